use criterion::{black_box, criterion_group, criterion_main, Criterion};

use axelari_core::answers::AnswerRecord;
use axelari_core::catalog::SeedData;
use axelari_core::metadata::{MetadataGenerator, MetadataMode};
use axelari_core::model::{
    AnswerOption, DimensionScore, Question, Section, SectionResult, SectionStatus,
};
use axelari_core::profile::aggregate;
use axelari_core::scoring::Scorecard;

const DIMENSIONS: [&str; 6] = [
    "Visual",
    "Auditory",
    "Reading/Writing",
    "Kinesthetic",
    "Working Memory",
    "Sustained Attention",
];

fn make_questions(n: u32) -> Vec<Question> {
    (1..=n)
        .map(|id| Question {
            id,
            text: format!("Question {id}"),
            dimension: DIMENSIONS[id as usize % DIMENSIONS.len()].to_string(),
            options: [100, 75, 50, 25]
                .into_iter()
                .map(|weight| AnswerOption {
                    text: format!("Option {weight}"),
                    weight,
                })
                .collect(),
        })
        .collect()
}

fn answer_every_other(questions: &[Question]) -> AnswerRecord {
    let mut record = AnswerRecord::new(1);
    for q in questions.iter().step_by(2) {
        record.record(q.id, q.options[(q.id % 4) as usize].weight);
    }
    record
}

fn completed_sections(n: u32) -> Vec<Section> {
    let template = SeedData::builtin().sections[0].clone();
    (1..=n)
        .map(|id| Section {
            id,
            status: SectionStatus::Completed,
            result: Some(SectionResult {
                score: 100,
                dimensions: DIMENSIONS
                    .iter()
                    .enumerate()
                    .map(|(i, name)| DimensionScore::new(*name, (id * 7 + i as u32 * 13) % 101))
                    .collect(),
                reliability: None,
            }),
            ..template.clone()
        })
        .collect()
}

fn bench_scorecard(c: &mut Criterion) {
    let mut group = c.benchmark_group("scorecard");

    for n in [5, 35, 200] {
        let questions = make_questions(n);
        let answers = answer_every_other(&questions);
        group.bench_function(format!("questions={n}"), |b| {
            b.iter(|| Scorecard::compute(black_box(&questions), black_box(&answers)))
        });
    }

    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for n in [1, 4, 50] {
        let sections = completed_sections(n);
        group.bench_function(format!("deterministic/sections={n}"), |b| {
            let mut metadata = MetadataGenerator::new(MetadataMode::Deterministic);
            b.iter(|| aggregate(black_box(&sections), &mut metadata))
        });
    }

    let sections = completed_sections(4);
    group.bench_function("seeded/sections=4", |b| {
        let mut metadata = MetadataGenerator::new(MetadataMode::Seeded { seed: 42 });
        b.iter(|| aggregate(black_box(&sections), &mut metadata))
    });

    group.finish();
}

criterion_group!(benches, bench_scorecard, bench_aggregate);
criterion_main!(benches);

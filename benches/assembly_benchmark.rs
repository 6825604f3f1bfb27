use criterion::{black_box, criterion_group, criterion_main, Criterion};
use refmat::assembly::ReferenceMatrixGenerator;
use refmat::element::lagrange::supported_elements;

pub fn generation_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation");
    group.sample_size(10);

    for (cell_type, degree) in supported_elements() {
        for parallel in [false, true] {
            let mut generator = ReferenceMatrixGenerator::new();
            generator.parallel(parallel);

            group.bench_function(
                format!(
                    "{} matrices of degree {degree} {cell_type} element",
                    if parallel { "Parallel" } else { "Serial" }
                ),
                |b| b.iter(|| black_box(generator.generate(cell_type, degree))),
            );
        }
    }
    group.finish();
}

pub fn symmetry_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("symmetry");
    group.sample_size(10);

    let mut generator = ReferenceMatrixGenerator::new();
    generator.parallel(false);
    for exploit_symmetry in [true, false] {
        generator.exploit_symmetry(exploit_symmetry);
        let g = generator.clone();
        group.bench_function(
            format!("Degree 2 Tetrahedron, exploit_symmetry = {exploit_symmetry}"),
            |b| {
                b.iter(|| {
                    black_box(g.generate(refmat::types::ReferenceCellType::Tetrahedron, 2))
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, generation_benchmark, symmetry_benchmark);
criterion_main!(benches);

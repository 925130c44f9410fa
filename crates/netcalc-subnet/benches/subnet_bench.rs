use criterion::{black_box, criterion_group, criterion_main, Criterion};
use netcalc_subnet::{calculate, prefix_for_hosts, Ipv4Block, Ipv4Report};

fn benchmark_ipv4_report(c: &mut Criterion) {
    c.bench_function("ipv4_parse_and_report", |b| {
        b.iter(|| {
            let block = Ipv4Block::parse(black_box("10.10.10.10/29")).ok()?;
            Some(Ipv4Report::from_block(&block))
        })
    });
}

fn benchmark_sizing(c: &mut Criterion) {
    c.bench_function("prefix_for_hosts_worst_case", |b| {
        b.iter(|| prefix_for_hosts(black_box((1u64 << 31) - 2)))
    });
}

fn benchmark_ipv6(c: &mut Criterion) {
    c.bench_function("ipv6_calculate", |b| {
        b.iter(|| calculate(black_box("2001:db8::1/64")))
    });
}

criterion_group!(benches, benchmark_ipv4_report, benchmark_sizing, benchmark_ipv6);
criterion_main!(benches);

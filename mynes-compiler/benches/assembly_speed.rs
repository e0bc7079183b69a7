//! Assembly speed benchmarks: how long the two-pass pipeline takes on
//! programs of increasing instruction count, label count, and symbol count.

use std::io::Write;
use std::path::PathBuf;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use nes_compiler::symbols::{ImportMap, SymbolTable};
use nes_compiler::{Assembler, Config};
use tempfile::NamedTempFile;

fn create_temp_asm_file(content: &str) -> NamedTempFile {
	let mut temp_file = NamedTempFile::new().expect("failed to create temp file");
	temp_file.write_all(content.as_bytes()).expect("failed to write to temp file");
	temp_file
}

/// A `STARTUP` block with `instruction_count` `lda`/`sta` pairs, plus a
/// full vector table.
fn generate_simple_program(instruction_count: usize) -> String {
	let mut program = String::new();
	program.push_str(".segment \"STARTUP\"\n");
	program.push_str("start:\n");
	for i in 0..instruction_count {
		program.push_str(&format!("    lda #${:02x}\n", i % 256));
		program.push_str(&format!("    sta ${:04x}\n", 0x0200 + (i % 0x600)));
	}
	program.push_str("    rts\n\n");
	program.push_str(".segment \"VECTORS\"\n");
	program.push_str("    .word start\n    .word start\n    .word start\n");
	program
}

/// A chain of `label_count` labels, each jumping to the next.
fn generate_complex_program(label_count: usize) -> String {
	let mut program = String::new();
	program.push_str(".segment \"STARTUP\"\n");
	for i in 0..label_count {
		program.push_str(&format!("label_{i}:\n"));
		program.push_str("    lda #$00\n");
		if i + 1 < label_count {
			program.push_str(&format!("    jmp label_{}\n", i + 1));
		} else {
			program.push_str("    rts\n");
		}
	}
	program.push_str("\n.segment \"VECTORS\"\n");
	program.push_str("    .word label_0\n    .word label_0\n    .word label_0\n");
	program
}

fn bench_simple_assembly(c: &mut Criterion) {
	let mut group = c.benchmark_group("simple_assembly");
	for instruction_count in [100, 500, 1000, 5000] {
		let program = generate_simple_program(instruction_count);
		let temp_file = create_temp_asm_file(&program);

		group.throughput(Throughput::Elements(instruction_count as u64));
		group.bench_with_input(BenchmarkId::new("instructions", instruction_count), &instruction_count, |b, _| {
			b.iter(|| {
				let config = Config::new(vec![temp_file.path().to_path_buf()], PathBuf::from("bench.nes")).build();
				Assembler::new(config).assemble().expect("benchmarked program should assemble");
			});
		});
	}
	group.finish();
}

fn bench_complex_assembly(c: &mut Criterion) {
	let mut group = c.benchmark_group("complex_assembly");
	for label_count in [50, 100, 250, 500] {
		let program = generate_complex_program(label_count);
		let temp_file = create_temp_asm_file(&program);

		group.throughput(Throughput::Elements(label_count as u64));
		group.bench_with_input(BenchmarkId::new("labels", label_count), &label_count, |b, _| {
			b.iter(|| {
				let config = Config::new(vec![temp_file.path().to_path_buf()], PathBuf::from("bench.nes")).build();
				Assembler::new(config).assemble().expect("benchmarked program should assemble");
			});
		});
	}
	group.finish();
}

fn bench_link(c: &mut Criterion) {
	let program_src = generate_simple_program(1000);
	let temp_file = create_temp_asm_file(&program_src);
	let config = Config::new(vec![temp_file.path().to_path_buf()], PathBuf::from("bench.nes")).build();
	let program = Assembler::new(config).assemble().expect("benchmarked program should assemble");

	c.bench_function("link_1000_instructions", |b| {
		b.iter(|| {
			nes_compiler::output::link(&program, nes_compiler::config::Mirroring::Horizontal).expect("linking should succeed");
		});
	});
}

fn bench_symbol_table(c: &mut Criterion) {
	let mut group = c.benchmark_group("symbol_table");

	group.bench_function("creation", |b| {
		b.iter(SymbolTable::new);
	});

	group.bench_function("import_map_lookup", |b| {
		let mut imports = ImportMap::new();
		for i in 0..100 {
			imports.insert(format!("runtime_fn_{i}"), nes_compiler::symbols::ImportSignature::new(0x8000 + i as u16, 1, false));
		}
		b.iter(|| {
			for i in 0..100 {
				let _ = imports.get(&format!("runtime_fn_{i}"));
			}
		});
	});
}

fn bench_file_operations(c: &mut Criterion) {
	let content = generate_simple_program(1000);
	c.bench_function("temp_file_creation", |b| {
		b.iter(|| {
			let _temp_file = create_temp_asm_file(&content);
		});
	});
}

criterion_group!(benches, bench_simple_assembly, bench_complex_assembly, bench_link, bench_symbol_table, bench_file_operations);
criterion_main!(benches);

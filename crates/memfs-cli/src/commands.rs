use std::io;

use anyhow::Context;
use colored::Colorize;
use memfs_bench::{run_benchmark, BenchConfig};
use memfs_shell::{Shell, ShellConfig};
use memfs_store::InMemoryFileStore;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    colored::control::set_override(cli.color);
    match cli.command {
        Some(Command::Shell(args)) => cmd_shell(args, cli.color),
        None => cmd_shell(ShellArgs { prompt: "memFS> ".into() }, cli.color),
        Some(Command::Bench(args)) => cmd_bench(args),
    }
}

fn cmd_shell(args: ShellArgs, color: bool) -> anyhow::Result<()> {
    let store = InMemoryFileStore::new();
    let shell = Shell::new(&store, ShellConfig { prompt: args.prompt, color });
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    shell
        .run(stdin.lock(), &mut stdout, &mut stderr)
        .context("shell session failed")?;
    Ok(())
}

fn cmd_bench(args: BenchArgs) -> anyhow::Result<()> {
    let config = bench_config(&args)?;
    let store = InMemoryFileStore::new();

    match args.format {
        OutputFormat::Json => {
            let report = run_benchmark(&store, &config);
            println!("{}", report.to_json()?);
        }
        OutputFormat::Text => {
            println!(
                "Benchmarking {} runs ({} thread counts × {} operation counts)...",
                config.run_count().to_string().bold(),
                config.thread_counts.len(),
                config.operation_counts.len(),
            );
            let report = run_benchmark(&store, &config);
            print!("\n{}", report.to_text());

            let failures = report.total_failures();
            if failures > 0 {
                eprintln!("{} {failures} benchmark cycles failed", "warning:".yellow().bold());
            } else {
                println!("{} All cycles completed.", "✓".green().bold());
            }
        }
    }
    Ok(())
}

fn bench_config(args: &BenchArgs) -> anyhow::Result<BenchConfig> {
    let mut config = match &args.config {
        Some(path) => BenchConfig::load(path)
            .with_context(|| format!("loading benchmark config {}", path.display()))?,
        None => BenchConfig::default(),
    };
    if !args.threads.is_empty() {
        config.thread_counts = args.threads.clone();
    }
    if !args.operations.is_empty() {
        config.operation_counts = args.operations.clone();
    }
    if let Some(size) = args.content_size {
        config.content_size = size;
    }
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> BenchArgs {
        BenchArgs {
            config: None,
            threads: vec![],
            operations: vec![],
            content_size: None,
            format: OutputFormat::Text,
        }
    }

    #[test]
    fn bench_config_defaults() {
        assert_eq!(bench_config(&args()).unwrap(), BenchConfig::default());
    }

    #[test]
    fn bench_config_overrides() {
        let mut a = args();
        a.threads = vec![2];
        a.operations = vec![5, 6];
        a.content_size = Some(10);
        let c = bench_config(&a).unwrap();
        assert_eq!(c.thread_counts, vec![2]);
        assert_eq!(c.operation_counts, vec![5, 6]);
        assert_eq!(c.content_size, 10);
    }

    #[test]
    fn bench_config_rejects_oversize_payload() {
        let mut a = args();
        a.content_size = Some(5000);
        assert!(bench_config(&a).is_err());
    }

    #[test]
    fn bench_config_missing_file() {
        let mut a = args();
        a.config = Some("/nonexistent/memfs-bench.toml".into());
        let err = bench_config(&a).unwrap_err();
        assert!(err.to_string().contains("loading benchmark config"));
    }
}

use crate::cli::RunArgs;
use diagnorm::config::Config;
use diagnorm::output::write_summary;
use diagnorm::parser::registry;
use diagnorm::runner::Orchestrator;
use tracing::{error, info, warn};

pub async fn execute(args: RunArgs) -> anyhow::Result<()> {
    // Load and validate config
    info!("Loading config from {:?}", args.config);
    let mut config = Config::load(&args.config)?;

    // Apply CLI overrides
    if let Some(concurrency) = args.concurrency {
        config.concurrency = concurrency;
    }
    if let Some(report_dir) = args.report_dir {
        config.report_dir = report_dir;
    }
    if args.fail_on.is_some() {
        config.fail_on = args.fail_on;
    }

    config.validate()?;

    if args.dry_run {
        info!("DRY RUN - no input will be parsed");
        print_execution_plan(&config);
        return Ok(());
    }

    info!("Reports will be written to {:?}", config.report_dir);
    let orchestrator = Orchestrator::new(config.clone());
    let report = orchestrator.run(&config.report_dir).await?;
    let summary = write_summary(&config.report_dir, &report, config.fail_on)?;

    for name in &summary.failed {
        warn!("Input {} could not be parsed", name);
    }

    let totals = report.totals();
    let counts: Vec<String> = totals
        .iter()
        .rev()
        .map(|(severity, count)| format!("{} {}", count, severity))
        .collect();
    info!(
        "Completed in {:.1}s: {} across {} inputs",
        report.total_duration.as_secs_f64(),
        counts.join(", "),
        report.input_results.len()
    );

    // Exit with error if the threshold was reached
    if summary.exit_code != 0 {
        if let Some(threshold) = config.fail_on {
            error!(
                "Exiting with error: {} issues at {} or worse",
                report.count_at_least(threshold),
                threshold
            );
        }
        std::process::exit(summary.exit_code);
    }

    Ok(())
}

fn print_execution_plan(config: &Config) {
    println!("\n=== Execution Plan ===\n");
    println!("Report dir: {:?}", config.report_dir);
    println!("Concurrency: {}", config.concurrency);
    println!("Max continuation lines: {}", config.max_continuation_lines);
    if let Some(threshold) = config.fail_on {
        println!("Fail on: {}", threshold);
    }

    println!("\nInputs to parse:");
    for input in &config.inputs {
        let tool_name = registry::find(&input.tool)
            .map(|descriptor| descriptor.name)
            .unwrap_or("unknown tool");
        println!(
            "  - {} ({}) <- {:?}",
            input.report_name(),
            tool_name,
            input.path
        );
    }
    println!();
}

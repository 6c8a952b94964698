use clap::Parser;

use upload_guard::checks::{self, Check, CheckContext};
use upload_guard::cli::{CheckArgs, Cli, ColorChoice, Commands};
use upload_guard::config::{Policy, load_policy};
use upload_guard::git::GixChangeSource;
use upload_guard::output::{
    CheckReport, ColorMode, CommitReport, JsonFormatter, OutputFormat, TextFormatter,
};
use upload_guard::{EXIT_CHECKS_FAILED, EXIT_SUCCESS, EXIT_TOOL_ERROR, Result, UploadGuardError};

const fn color_choice_to_mode(choice: ColorChoice) -> ColorMode {
    match choice {
        ColorChoice::Auto => ColorMode::Auto,
        ColorChoice::Always => ColorMode::Always,
        ColorChoice::Never => ColorMode::Never,
    }
}

fn main() {
    let cli = Cli::parse();

    let exit_code = match &cli.command {
        Commands::Check(args) => run_check(args, &cli),
        Commands::Checks => run_list(),
    };

    std::process::exit(exit_code);
}

fn run_list() -> i32 {
    for check in checks::registry() {
        println!("{}", check.name);
    }
    EXIT_SUCCESS
}

fn run_check(args: &CheckArgs, cli: &Cli) -> i32 {
    match run_check_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_TOOL_ERROR
        }
    }
}

fn run_check_impl(args: &CheckArgs, cli: &Cli) -> Result<i32> {
    // 1. Open the repository and load the policy tables
    let source = GixChangeSource::discover(&args.path)?;
    let root = source.workdir().to_path_buf();
    let policy = if cli.no_config {
        Policy::default()
    } else {
        load_policy(args.config.as_deref(), &root)?
    };

    let project = args.project.clone().unwrap_or_else(|| {
        root.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    });
    let selected = selected_checks(&args.check)?;

    // 2. Run the selected checks against each commit. A check error is a
    //    tool fault and aborts the run; lint failures accumulate.
    let mut reports = Vec::new();
    for commit in &args.commit {
        let ctx = CheckContext {
            project: &project,
            commit,
            project_root: &root,
            source: &source,
            policy: &policy,
        };
        let mut results = Vec::new();
        for check in &selected {
            results.push(CheckReport {
                name: check.name.to_string(),
                failure: (check.run)(&ctx)?,
            });
        }
        reports.push(CommitReport {
            commit: commit.clone(),
            checks: results,
        });
    }

    // 3. Report
    let all_passed = reports.iter().all(CommitReport::passed);
    let output = match args.format {
        OutputFormat::Text => TextFormatter::new(color_choice_to_mode(cli.color)).format(&reports),
        OutputFormat::Json => JsonFormatter::format(&reports)?,
    };
    if !cli.quiet || !all_passed {
        print!("{output}");
    }

    if all_passed {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_CHECKS_FAILED)
    }
}

fn selected_checks(names: &[String]) -> Result<Vec<&'static Check>> {
    if names.is_empty() {
        return Ok(checks::registry().iter().collect());
    }
    names
        .iter()
        .map(|name| {
            checks::registry()
                .iter()
                .find(|check| check.name == *name)
                .ok_or_else(|| UploadGuardError::UnknownCheck(name.clone()))
        })
        .collect()
}

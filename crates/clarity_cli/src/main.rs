//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `clarity_core` linkage and storage configuration from a shell.
//! - Print every rendered section of the configured store.

use clarity_core::{
    AssessmentController, CoreConfig, CoreContext, GoalController, HabitController, MoodController,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("clarity_core ping={}", clarity_core::ping());
    println!("clarity_core version={}", clarity_core::core_version());

    let config = match CoreConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(log_dir) = config.log_dir.as_ref().and_then(|dir| dir.to_str()) {
        if let Err(err) = clarity_core::init_logging(config.log_level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    println!("clarity_core db_path={}", config.db_path.display());
    let ctx = match CoreContext::open(config) {
        Ok(ctx) => ctx,
        Err(err) => {
            eprintln!("failed to open storage: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("[moods]\n{}", MoodController::load(&ctx).history_view());
    println!(
        "[assessments]\n{}",
        AssessmentController::load(&ctx).history_view()
    );
    println!("[habits]\n{}", HabitController::load(&ctx).view());
    println!("[goals]\n{}", GoalController::load(&ctx).view());
    if ctx.degraded() {
        eprintln!("warning: storage reported errors; changes may not be saved");
    }
    ExitCode::SUCCESS
}

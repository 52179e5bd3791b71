use std::path::PathBuf;

use dialogue_core::Unlocked;

use crate::app::AppContext;
use crate::cli::UnlockArgs;
use crate::errors::CliError;
use crate::helpers::unlocked_path;

pub fn handle_unlock(ctx: &AppContext, args: &UnlockArgs) -> anyhow::Result<()> {
    if !args.path.is_file() {
        CliError::not_found(
            format!("No locked file at {}", args.path.display()),
            "Hint: Pass a path produced by `dialogue lock`.",
        )
        .exit()
    }

    let output = resolve_output(ctx, args);
    if output == args.path {
        CliError::invalid_input(format!(
            "Output path is the locked file itself: {}\nHint: Pass --output to choose another destination.",
            output.display()
        ))
        .exit()
    }

    let password = ctx.read_password()?;
    let outcome = ctx
        .locker(false)
        .unlock(&args.path, &output, &password)
        .unwrap_or_else(|e| CliError::from(e).exit());

    if !ctx.quiet() {
        let kind = match outcome {
            Unlocked::File => "file",
            Unlocked::Directory => "directory",
        };
        println!(
            "Unlocked {} -> {} ({})",
            args.path.display(),
            output.display(),
            kind
        );
    }
    Ok(())
}

fn resolve_output(ctx: &AppContext, args: &UnlockArgs) -> PathBuf {
    if let Some(output) = &args.output {
        return output.clone();
    }
    let paths = &ctx.config().paths;
    unlocked_path(&args.path, &paths.locked_suffix, &paths.unlocked_suffix).unwrap_or_else(|| {
        CliError::invalid_input(format!(
            "Cannot derive an output name from {}\nHint: Pass --output.",
            args.path.display()
        ))
        .exit()
    })
}

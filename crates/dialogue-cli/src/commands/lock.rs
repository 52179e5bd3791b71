use crate::app::AppContext;
use crate::cli::LockArgs;
use crate::errors::CliError;

pub fn handle_lock(ctx: &AppContext, args: &LockArgs) -> anyhow::Result<()> {
    if !args.path.exists() {
        CliError::not_found(
            format!("No such file or directory: {}", args.path.display()),
            "Hint: Pass the file or directory you want to lock.",
        )
        .exit()
    }

    let compress = args.compress || ctx.config().lock.compress;
    let password = ctx.read_password()?;

    ctx.locker(compress)
        .lock(&args.path, &password)
        .unwrap_or_else(|e| CliError::from(e).exit());

    if !ctx.quiet() {
        println!("Locked {}", args.path.display());
    }
    Ok(())
}

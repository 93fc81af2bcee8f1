use crate::config::AppContext;
use crate::error::AppError;
use crate::store::SettingsStore;

/// Print the exported environment in shell-export syntax, sorted by name.
pub fn execute(ctx: &AppContext) -> Result<(), AppError> {
    let cfg = SettingsStore::new(ctx).load();
    let mut env = SettingsStore::export_env(&cfg);
    env.sort_by(|a, b| a.0.cmp(&b.0));

    for (name, value) in env {
        println!("export {name}=\"{value}\"");
    }
    Ok(())
}

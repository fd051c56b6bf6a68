use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { print, runs, limit } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        if *print {
            LogLogic::print_log(&mut pool)?;
        }
        if *runs {
            LogLogic::print_runs(&mut pool, *limit)?;
        }
    }

    Ok(())
}

use anyhow::Result;

use crate::args::{AccountCommand, Cli, Commands, VideoCommand};
use crate::context::AppContext;
use crate::handlers;

pub async fn run(cli: Cli) -> Result<()> {
    let ctx = AppContext::open(cli.data_dir.as_deref())?;

    match cli.command {
        Commands::Account { command } => match command {
            AccountCommand::List => handlers::account::list(&ctx).await,
            AccountCommand::Add {
                uid,
                username,
                avatar,
                token,
            } => handlers::account::add(&ctx, uid, &username, &avatar, &token).await,
            AccountCommand::Remove { uid } => handlers::account::remove(&ctx, uid).await,
            AccountCommand::Switch { uid } => handlers::account::switch(&ctx, uid).await,
            AccountCommand::Show { uid } => handlers::account::show(&ctx, uid),
        },
        Commands::Whoami => handlers::account::whoami(&ctx),
        Commands::Videos { command } => match command {
            VideoCommand::Normalize { file, shape, json } => {
                handlers::video::normalize(&file, shape, json)
            }
        },
    }
}

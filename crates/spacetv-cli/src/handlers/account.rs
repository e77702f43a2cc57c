use anyhow::{bail, Result};
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use spacetv_types::{truncate, UserProfile};

use crate::context::AppContext;

pub async fn list(ctx: &AppContext) -> Result<()> {
    ctx.controller.refresh().await?;
    let state = ctx.controller.state();

    if state.users.is_empty() {
        println!("No stored accounts. Add one with `spacetv account add`.");
        return Ok(());
    }

    let color = std::io::stdout().is_terminal();
    println!("{:<3} {:>12}  {}", "", "UID", "USERNAME");
    for user in &state.users {
        let active = user.uid == state.current.uid;
        let marker = if active { "*" } else { " " };
        let line = format!(
            "{:<3} {:>12}  {}",
            marker,
            user.uid,
            truncate(&user.username, 40)
        );
        if active && color {
            println!("{}", line.green());
        } else {
            println!("{}", line);
        }
    }

    if state.current.is_logged_out() {
        println!("\nNo active account.");
    }
    Ok(())
}

pub async fn add(
    ctx: &AppContext,
    uid: i64,
    username: &str,
    avatar: &str,
    token: &str,
) -> Result<()> {
    if uid < 0 {
        bail!("uid must be non-negative (negative uids are reserved)");
    }

    let profile = UserProfile::new(uid, username, avatar, token);
    {
        let store = ctx.store.lock().unwrap();
        store.insert(&profile)?;
    }

    // Same contract as the login flow: durable insert, then refresh.
    ctx.controller.refresh().await?;
    println!("Stored account {} ({})", username, uid);
    Ok(())
}

pub async fn remove(ctx: &AppContext, uid: i64) -> Result<()> {
    ctx.controller.refresh().await?;
    let state = ctx.controller.state();

    let Some(target) = state.users.iter().find(|u| u.uid == uid).cloned() else {
        bail!("No stored account with uid {}", uid);
    };

    ctx.controller.delete_user(&target).await?;

    let state = ctx.controller.state();
    if state.current.is_logged_out() {
        println!("Removed account {}. No accounts remain; logged out.", uid);
    } else {
        println!(
            "Removed account {}. Active account is now {} ({}).",
            uid, state.current.username, state.current.uid
        );
    }
    Ok(())
}

pub async fn switch(ctx: &AppContext, uid: i64) -> Result<()> {
    ctx.controller.refresh().await?;
    let state = ctx.controller.state();

    // switch_user expects a member of the projection; resolve here.
    let Some(target) = state.users.iter().find(|u| u.uid == uid).cloned() else {
        bail!("No stored account with uid {}", uid);
    };

    ctx.controller.switch_user(&target).await?;
    println!("Switched to {} ({})", target.username, target.uid);
    Ok(())
}

pub fn show(ctx: &AppContext, uid: i64) -> Result<()> {
    let user = {
        let store = ctx.store.lock().unwrap();
        store.get(uid)?
    };
    let Some(user) = user else {
        bail!("No stored account with uid {}", uid);
    };

    println!("uid:      {}", user.uid);
    println!("username: {}", user.username);
    println!("avatar:   {}", user.avatar);
    // QR rendering of the token is the display layer's job.
    println!("token:    {}", user.auth_token);
    Ok(())
}

pub fn whoami(ctx: &AppContext) -> Result<()> {
    let current = ctx.session.current()?;
    if current.is_logged_out() {
        println!("Not logged in.");
    } else {
        println!("{} ({})", current.username, current.uid);
    }
    Ok(())
}

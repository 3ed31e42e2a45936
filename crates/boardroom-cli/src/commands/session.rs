use anyhow::Result;
use boardroom_application::AuthService;
use boardroom_core::session::Theme;
use boardroom_core::view::View;
use colored::Colorize;

use super::AppContext;
use super::utils::{print_success, prompt};

pub enum ThemeChange {
    Dark,
    Light,
    Toggle,
}

pub async fn login(ctx: &AppContext, username: &str, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => prompt("Password: ")?,
    };
    let auth = AuthService::new(ctx.gateway()?, ctx.store.clone());
    let role = auth.login(username, &password).await?;
    print_success(&format!("Logged in as {} ({})", username.trim(), role));
    Ok(())
}

pub async fn logout(ctx: &AppContext) -> Result<()> {
    ctx.store.lock().await.logout()?;
    print_success("Logged out. Local vote history cleared.");
    Ok(())
}

pub async fn status(ctx: &AppContext) -> Result<()> {
    let store = ctx.store.lock().await;
    let session = store.session();
    let ledger = store.ledger();

    match store.view() {
        View::Login => println!("{}", "Not logged in".yellow()),
        View::Judge => println!("{}", "Logged in as judge".green()),
        View::Participant => {
            println!("{}", "Logged in as participant".green());
            println!("  Statements voted on: {}", ledger.vote_counts().len());
            println!(
                "  Neutral vote: {}",
                if ledger.neutral_used() { "used" } else { "available" }
            );
        }
    }
    println!("  Theme: {}", session.theme());
    println!("  State: {}", ctx.state_location.bright_black());
    Ok(())
}

pub async fn theme(ctx: &AppContext, change: Option<ThemeChange>) -> Result<()> {
    let mut store = ctx.store.lock().await;
    let theme = match change {
        None => {
            println!("Theme: {}", store.session().theme());
            return Ok(());
        }
        Some(ThemeChange::Toggle) => store.toggle_theme()?,
        Some(ThemeChange::Dark) => {
            store.set_theme(Theme::Dark)?;
            Theme::Dark
        }
        Some(ThemeChange::Light) => {
            store.set_theme(Theme::Light)?;
            Theme::Light
        }
    };
    print_success(&format!("Theme set to {}", theme));
    Ok(())
}

pub fn show_config(ctx: &AppContext) -> Result<()> {
    match ctx.config().resolve(ctx.api_url_override()) {
        Ok(config) => println!("API URL: {}", config.api_url),
        Err(err) => println!("API URL: {}", err.to_string().yellow()),
    }
    println!("State: {}", ctx.state_location.bright_black());
    Ok(())
}

pub fn set_api_url(ctx: &AppContext, url: &str) -> Result<()> {
    ctx.config().set_api_url(url)?;
    print_success(&format!("API URL set to {}", url.trim()));
    Ok(())
}

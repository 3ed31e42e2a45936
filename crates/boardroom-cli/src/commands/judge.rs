use anyhow::Result;
use boardroom_application::{JudgeWorkflow, ToggleOutcome};
use boardroom_core::statement::{Stance, Statement, StatementId, parse_duration_minutes};
use boardroom_core::view::View;
use chrono::Utc;
use colored::Colorize;

use super::AppContext;
use super::utils::{print_notice, print_statement_row, prompt};

async fn workflow(ctx: &AppContext) -> Result<JudgeWorkflow> {
    ctx.require_view(View::Judge).await?;
    Ok(JudgeWorkflow::new(ctx.gateway()?, ctx.store.clone()))
}

fn print_statements(statements: &[Statement]) {
    if statements.is_empty() {
        println!("{}", "No statements yet".bright_black());
        return;
    }
    let now = Utc::now();
    for statement in statements {
        print_statement_row(statement, now);
    }
}

pub async fn statements(ctx: &AppContext) -> Result<()> {
    let workflow = workflow(ctx).await?;
    print_statements(&workflow.refresh_statements().await?);
    Ok(())
}

pub async fn publish(ctx: &AppContext, text: &str, stance: Stance, duration: i64) -> Result<()> {
    let workflow = workflow(ctx).await?;
    let statements = workflow.set_statement(text, stance, duration).await?;
    print_notice(workflow.notice().await);
    print_statements(&statements);
    Ok(())
}

pub async fn deactivate(ctx: &AppContext, id: &str) -> Result<()> {
    let workflow = workflow(ctx).await?;
    if let ToggleOutcome::Deactivated(statements) = workflow
        .toggle_active(&StatementId::from(id), true)
        .await?
    {
        print_notice(workflow.notice().await);
        print_statements(&statements);
    }
    Ok(())
}

pub async fn reactivate(ctx: &AppContext, id: &str, duration: Option<i64>) -> Result<()> {
    let workflow = workflow(ctx).await?;
    workflow
        .toggle_active(&StatementId::from(id), false)
        .await?;

    let duration = match duration {
        Some(minutes) => minutes,
        None => match parse_duration_minutes(&prompt("Voting duration in minutes: ")?) {
            Ok(minutes) => i64::from(minutes),
            Err(err) => {
                workflow.cancel_reactivation().await;
                return Err(err.into());
            }
        },
    };

    let statements = workflow.confirm_reactivation(duration).await?;
    print_notice(workflow.notice().await);
    print_statements(&statements);
    Ok(())
}

pub async fn results(ctx: &AppContext) -> Result<()> {
    let workflow = workflow(ctx).await?;
    let scores = workflow.get_results().await?;
    if scores.is_empty() {
        println!("{}", "No scores yet".bright_black());
    }
    for (rank, entry) in scores.iter().enumerate() {
        println!("{:>3}. {}", rank + 1, entry);
    }
    Ok(())
}

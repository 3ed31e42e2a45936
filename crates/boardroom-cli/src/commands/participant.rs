use anyhow::Result;
use boardroom_application::ParticipantWorkflow;
use boardroom_core::error::BoardroomError;
use boardroom_core::ledger::{MAX_VOTES_PER_STATEMENT, VoteChoice};
use boardroom_core::statement::StatementId;
use boardroom_core::view::View;
use chrono::Utc;
use colored::Colorize;

use super::AppContext;
use super::utils::{confirm, print_notice, print_statement};

async fn workflow(ctx: &AppContext) -> Result<ParticipantWorkflow> {
    ctx.require_view(View::Participant).await?;
    Ok(ParticipantWorkflow::new(ctx.gateway()?, ctx.store.clone()))
}

pub async fn statement(ctx: &AppContext) -> Result<()> {
    let workflow = workflow(ctx).await?;
    let now = Utc::now();
    match workflow.load_active_statement(now).await? {
        Some(statement) => {
            print_statement(&statement, now);
            let used = ctx.store.lock().await.ledger().vote_count(&statement.id);
            println!("  Your votes: {}/{}", used, MAX_VOTES_PER_STATEMENT);
            if !workflow.can_vote_neutral().await {
                println!("  {}", "Neutral vote already used".bright_black());
            }
        }
        None => println!("{}", "No active statement available".yellow()),
    }
    Ok(())
}

pub async fn vote(
    ctx: &AppContext,
    choice: VoteChoice,
    expected_id: Option<&str>,
    assume_yes: bool,
) -> Result<()> {
    let workflow = workflow(ctx).await?;
    let expected_id = expected_id.map(StatementId::from);
    workflow
        .check_local_eligibility(expected_id.as_ref(), choice)
        .await?;

    let now = Utc::now();
    let Some(statement) = workflow.load_active_statement(now).await? else {
        return Err(BoardroomError::statement_unavailable("No active statement available").into());
    };
    if let Some(expected) = &expected_id
        && *expected != statement.id
    {
        return Err(BoardroomError::statement_unavailable(format!(
            "Statement {} is not the active statement (active: {})",
            expected, statement.id
        ))
        .into());
    }
    print_statement(&statement, now);

    workflow.select_vote(choice, now).await?;
    if !assume_yes && !confirm(&format!("Vote \"{}\" on statement {}?", choice, statement.id))? {
        workflow.cancel_vote().await?;
        println!("{}", "Vote cancelled".yellow());
        return Ok(());
    }

    workflow
        .submit_vote(&statement.id, choice, Utc::now())
        .await?;
    print_notice(workflow.notice().await);
    Ok(())
}

pub async fn history(ctx: &AppContext) -> Result<()> {
    ctx.require_view(View::Participant).await?;
    let store = ctx.store.lock().await;
    let ledger = store.ledger();

    if ledger.vote_history().is_empty() {
        println!("{}", "No votes yet".bright_black());
        return Ok(());
    }
    for record in ledger.vote_history() {
        println!(
            "Statement {}: {} ({}/{} votes used)",
            record.statement_id.to_string().bold(),
            record.vote,
            ledger.vote_count(&record.statement_id),
            MAX_VOTES_PER_STATEMENT
        );
    }
    Ok(())
}

use std::{env, fs, path::PathBuf};

use ts_rs::TS;

fn generate_types_content() -> String {
    let decls = [
        db::types::SongPhase::decl(),
        db::types::SongStatus::decl(),
        db::types::ProjectStatus::decl(),
        db::types::TaskStatus::decl(),
        db::models::project::Project::decl(),
        db::models::project::CreateProject::decl(),
        db::models::project::UpdateProject::decl(),
        db::models::song::Song::decl(),
        db::models::song::CreateSong::decl(),
        db::models::song::UpdateSong::decl(),
        db::models::task::Task::decl(),
        db::models::task::CreateTask::decl(),
        db::models::task::UpdateTask::decl(),
        db::models::task_comment::TaskComment::decl(),
        db::models::task_comment::CreateTaskComment::decl(),
        db::models::budget_item::BudgetItem::decl(),
        db::models::budget_item::CreateBudgetItem::decl(),
        db::models::budget_item::UpdateBudgetItem::decl(),
        workflow::ActorRole::decl(),
        workflow::SongChange::decl(),
        workflow::board::BoardColumns::decl(),
        workflow::budget::CategoryTotal::decl(),
        workflow::budget::BudgetSummary::decl(),
        workflow::progress::PhaseBreakdown::decl(),
        workflow::overview::ProjectOverview::decl(),
        server::routes::songs::SongAdvanceResponse::decl(),
        server::routes::tasks::MoveTaskRequest::decl(),
        server::routes::tasks::MoveTaskResponse::decl(),
        config::ServerConfig::decl(),
        config::DatabaseConfig::decl(),
        config::Config::decl(),
        utils::response::ApiResponse::<()>::decl(),
    ];

    let body = decls
        .into_iter()
        .map(|decl| format!("export {decl}"))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("// This file was generated by `generate_types`. Do not edit by hand.\n\n{body}\n")
}

fn main() {
    let check_mode = env::args().any(|arg| arg == "--check");
    let out_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../shared/types.ts");
    let generated = generate_types_content();

    if check_mode {
        let current = fs::read_to_string(&out_path).unwrap_or_default();
        if current == generated {
            println!("shared/types.ts is up to date.");
            return;
        }
        eprintln!("shared/types.ts is out of date. Run `cargo run --bin generate_types`.");
        std::process::exit(1);
    }

    if let Some(parent) = out_path.parent()
        && let Err(err) = fs::create_dir_all(parent)
    {
        eprintln!("Failed to create {}: {err}", parent.display());
        std::process::exit(1);
    }
    if let Err(err) = fs::write(&out_path, generated) {
        eprintln!("Failed to write {}: {err}", out_path.display());
        std::process::exit(1);
    }
    println!("Wrote {}", out_path.display());
}

//! Commands that change song or task state, each executed as one unit.
//!
//! Song mutations always end with the owning project's progress and status
//! being recomputed and written back.

use chrono::NaiveDate;
use db::{
    DbPool, TransactionTrait,
    models::{
        budget_item::BudgetItem,
        project::Project,
        song::{CreateSong, Song, UpdateSong},
        task::Task,
    },
    types::{ProjectStatus, SongPhase, TaskStatus},
};
use serde::Serialize;
use tracing::info;
use ts_rs::TS;
use uuid::Uuid;

use crate::{
    actor::Actor,
    board::{BoardColumns, BoardMove, move_task},
    error::{StoreResultExt, WorkflowError},
    overview::ProjectOverview,
    phase::{self, PhaseAdvance},
    progress::{SongSnapshot, project_progress},
    store::{SeaOrmStore, SongPatch, WorkflowStore},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowCommand {
    AdvanceSongPhase { song_id: Uuid },
    CompleteSong { song_id: Uuid },
    SetSongPhase { song_id: Uuid, phase: SongPhase },
    MoveTask { task_id: Uuid, status: TaskStatus },
    RecalculateProject { project_id: Uuid },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum WorkflowOutcome {
    SongAdvanced { song: Song, project: Project },
    /// The song sits in its last phase; nothing was written.
    CompletionRequested { song: Song },
    SongCompleted { song: Song, project: Project },
    SongPhaseSet { song: Song, project: Project },
    TaskMoved { task: Task },
    TaskUnchanged { task: Task },
    ProjectRecalculated { project: Project },
}

/// A song together with its project after progress was recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
pub struct SongChange {
    pub song: Song,
    pub project: Project,
}

/// Recomputes progress from the project's songs and persists it with the derived status.
pub async fn recalculate_project<S>(store: &S, project_id: Uuid) -> Result<Project, WorkflowError>
where
    S: WorkflowStore + ?Sized,
{
    let songs = store
        .list_songs(project_id)
        .await
        .or_missing(WorkflowError::ProjectNotFound)?;
    let progress = project_progress(&songs);
    let status = ProjectStatus::from_progress(progress);
    let project = store
        .update_project_progress(project_id, progress, status)
        .await
        .or_missing(WorkflowError::ProjectNotFound)?;
    info!(
        project_id = %project_id,
        progress,
        status = %status,
        songs = songs.len(),
        "project progress recalculated"
    );
    Ok(project)
}

async fn write_song<S>(
    store: &S,
    song_id: Uuid,
    patch: SongPatch,
) -> Result<(Song, Project), WorkflowError>
where
    S: WorkflowStore + ?Sized,
{
    let song = store
        .update_song(song_id, patch)
        .await
        .or_missing(WorkflowError::SongNotFound)?;
    let project = recalculate_project(store, song.project_id).await?;
    Ok((song, project))
}

async fn load_song<S>(store: &S, song_id: Uuid) -> Result<Song, WorkflowError>
where
    S: WorkflowStore + ?Sized,
{
    store
        .find_song(song_id)
        .await?
        .ok_or(WorkflowError::SongNotFound)
}

async fn set_song_phase<S>(
    store: &S,
    song: &Song,
    phase: SongPhase,
) -> Result<(Song, Project), WorkflowError>
where
    S: WorkflowStore + ?Sized,
{
    let phase = phase::set_phase(song.status, phase)?;
    let patch = SongPatch {
        phase: Some(phase),
        status: None,
    };
    let (song, project) = write_song(store, song.id, patch).await?;
    info!(
        song_id = %song.id,
        project_id = %project.id,
        phase = %song.phase,
        progress = project.progress,
        "song phase set"
    );
    Ok((song, project))
}

/// Runs `command` against `store`. Writes are not rolled back here; callers
/// needing atomicity pass a store bound to a transaction.
pub async fn execute<S>(
    store: &S,
    actor: Actor,
    command: WorkflowCommand,
) -> Result<WorkflowOutcome, WorkflowError>
where
    S: WorkflowStore + ?Sized,
{
    match command {
        WorkflowCommand::AdvanceSongPhase { song_id } => {
            let song = load_song(store, song_id).await?;
            match phase::advance_phase(song.phase, song.status)? {
                PhaseAdvance::CompletionRequested => {
                    info!(song_id = %song_id, "song in last phase, completion requested");
                    Ok(WorkflowOutcome::CompletionRequested { song })
                }
                PhaseAdvance::Next(next) => {
                    let patch = SongPatch {
                        phase: Some(next),
                        status: None,
                    };
                    let (song, project) = write_song(store, song_id, patch).await?;
                    info!(
                        song_id = %song_id,
                        project_id = %project.id,
                        phase = %song.phase,
                        progress = project.progress,
                        "song phase advanced"
                    );
                    Ok(WorkflowOutcome::SongAdvanced { song, project })
                }
            }
        }
        WorkflowCommand::CompleteSong { song_id } => {
            if !actor.is_admin() {
                return Err(WorkflowError::Forbidden(
                    "Only admins can complete a song".to_string(),
                ));
            }
            let song = load_song(store, song_id).await?;
            let status = phase::complete_song(song.status)?;
            let patch = SongPatch {
                phase: None,
                status: Some(status),
            };
            let (song, project) = write_song(store, song_id, patch).await?;
            info!(
                song_id = %song_id,
                project_id = %project.id,
                progress = project.progress,
                "song completed"
            );
            Ok(WorkflowOutcome::SongCompleted { song, project })
        }
        WorkflowCommand::SetSongPhase { song_id, phase } => {
            let song = load_song(store, song_id).await?;
            let (song, project) = set_song_phase(store, &song, phase).await?;
            Ok(WorkflowOutcome::SongPhaseSet { song, project })
        }
        WorkflowCommand::MoveTask { task_id, status } => {
            let task = store
                .find_task(task_id)
                .await?
                .ok_or(WorkflowError::TaskNotFound)?;
            match move_task(task.status, status) {
                BoardMove::Unchanged => Ok(WorkflowOutcome::TaskUnchanged { task }),
                BoardMove::Moved { from, to } => {
                    let task = store
                        .update_task_status(task_id, to)
                        .await
                        .or_missing(WorkflowError::TaskNotFound)?;
                    info!(task_id = %task_id, %from, %to, "task moved");
                    Ok(WorkflowOutcome::TaskMoved { task })
                }
            }
        }
        WorkflowCommand::RecalculateProject { project_id } => {
            let project = recalculate_project(store, project_id).await?;
            Ok(WorkflowOutcome::ProjectRecalculated { project })
        }
    }
}

/// Executes workflow commands against the database, one transaction per call.
#[derive(Clone)]
pub struct WorkflowService {
    db: DbPool,
}

impl WorkflowService {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// Commits only when the command succeeds; any error drops the transaction.
    pub async fn execute(
        &self,
        actor: Actor,
        command: WorkflowCommand,
    ) -> Result<WorkflowOutcome, WorkflowError> {
        let tx = self.db.begin().await?;
        let outcome = execute(&SeaOrmStore::new(&tx), actor, command).await?;
        tx.commit().await?;
        Ok(outcome)
    }

    pub async fn add_song(&self, data: &CreateSong) -> Result<SongChange, WorkflowError> {
        let tx = self.db.begin().await?;
        let song = Song::create(&tx, data, Uuid::new_v4()).await?;
        let project = recalculate_project(&SeaOrmStore::new(&tx), song.project_id).await?;
        tx.commit().await?;
        info!(song_id = %song.id, project_id = %project.id, "song added");
        Ok(SongChange { song, project })
    }

    /// Title-only edits are allowed on any song. A payload carrying a phase
    /// is checked against the state machine first and, on a completed song,
    /// rejected as a whole with nothing written.
    pub async fn update_song(
        &self,
        song_id: Uuid,
        payload: &UpdateSong,
    ) -> Result<SongChange, WorkflowError> {
        let tx = self.db.begin().await?;
        let store = SeaOrmStore::new(&tx);
        let mut song = load_song(&store, song_id).await?;
        if let Some(phase) = payload.phase {
            phase::set_phase(song.status, phase)?;
        }

        if let Some(title) = payload.title.as_deref() {
            song = Song::update_title(&tx, song_id, title).await?;
        }

        let change = match payload.phase {
            Some(phase) => {
                let (song, project) = set_song_phase(&store, &song, phase).await?;
                SongChange { song, project }
            }
            None => {
                let project = Project::find_by_id(&tx, song.project_id)
                    .await?
                    .ok_or(WorkflowError::ProjectNotFound)?;
                SongChange { song, project }
            }
        };

        tx.commit().await?;
        Ok(change)
    }

    /// Deletes the song and returns its project with progress recomputed.
    pub async fn delete_song(&self, song_id: Uuid) -> Result<Project, WorkflowError> {
        let tx = self.db.begin().await?;
        let store = SeaOrmStore::new(&tx);
        let song = load_song(&store, song_id).await?;
        Song::delete(&tx, song_id).await?;
        let project = recalculate_project(&store, song.project_id).await?;
        tx.commit().await?;
        info!(song_id = %song_id, project_id = %project.id, "song deleted");
        Ok(project)
    }

    pub async fn overview(
        &self,
        project_id: Uuid,
        today: NaiveDate,
    ) -> Result<ProjectOverview, WorkflowError> {
        let project = Project::find_by_id(&self.db, project_id)
            .await?
            .ok_or(WorkflowError::ProjectNotFound)?;
        let songs: Vec<SongSnapshot> = Song::find_states_by_project_id(&self.db, project_id)
            .await
            .or_missing(WorkflowError::ProjectNotFound)?
            .into_iter()
            .map(SongSnapshot::from)
            .collect();
        let items = BudgetItem::find_by_project_id(&self.db, project_id)
            .await
            .or_missing(WorkflowError::ProjectNotFound)?;
        Ok(ProjectOverview::build(project, &songs, &items, today))
    }

    pub async fn board(&self, project_id: Uuid) -> Result<BoardColumns, WorkflowError> {
        let tasks = Task::find_by_project_id(&self.db, project_id)
            .await
            .or_missing(WorkflowError::ProjectNotFound)?;
        Ok(BoardColumns::from_tasks(tasks))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use db::{
        DBService,
        models::{
            budget_item::CreateBudgetItem,
            project::CreateProject,
            task::CreateTask,
        },
        types::SongStatus,
    };

    use super::*;
    use crate::{phase::TransitionError, store::memory::MemoryStore};

    #[tokio::test]
    async fn advance_moves_phase_and_recomputes_progress() {
        let (store, project_id) = MemoryStore::with_project();
        let song_id = store.add_song(project_id, SongPhase::Production, SongStatus::Pending);
        store.add_song(project_id, SongPhase::Publishing, SongStatus::Pending);

        let outcome = execute(
            &store,
            Actor::member(),
            WorkflowCommand::AdvanceSongPhase { song_id },
        )
        .await
        .unwrap();

        let WorkflowOutcome::SongAdvanced { song, project } = outcome else {
            panic!("expected SongAdvanced, got {outcome:?}");
        };
        assert_eq!(song.phase, SongPhase::Engineering);
        assert_eq!(project.progress, 62.5);
        assert_eq!(project.status, ProjectStatus::Active);
        assert_eq!(store.project(project_id).progress, 62.5);
    }

    #[tokio::test]
    async fn advance_at_last_phase_requests_completion_without_writing() {
        let (store, project_id) = MemoryStore::with_project();
        let song_id = store.add_song(project_id, SongPhase::Publishing, SongStatus::Pending);

        let outcome = execute(
            &store,
            Actor::admin(),
            WorkflowCommand::AdvanceSongPhase { song_id },
        )
        .await
        .unwrap();

        assert!(matches!(outcome, WorkflowOutcome::CompletionRequested { .. }));
        assert_eq!(store.song(song_id).phase, SongPhase::Publishing);
        assert_eq!(store.project(project_id).progress, 0.0);
    }

    #[tokio::test]
    async fn completion_is_admin_only_and_terminal() {
        let (store, project_id) = MemoryStore::with_project();
        let song_id = store.add_song(project_id, SongPhase::Publishing, SongStatus::Pending);

        let denied = execute(
            &store,
            Actor::member(),
            WorkflowCommand::CompleteSong { song_id },
        )
        .await;
        assert!(matches!(denied, Err(WorkflowError::Forbidden(_))));
        assert_eq!(store.song(song_id).status, SongStatus::Pending);

        let outcome = execute(
            &store,
            Actor::admin(),
            WorkflowCommand::CompleteSong { song_id },
        )
        .await
        .unwrap();
        let WorkflowOutcome::SongCompleted { project, .. } = outcome else {
            panic!("expected SongCompleted, got {outcome:?}");
        };
        assert_eq!(project.progress, 100.0);
        assert_eq!(project.status, ProjectStatus::Completed);

        for command in [
            WorkflowCommand::AdvanceSongPhase { song_id },
            WorkflowCommand::CompleteSong { song_id },
            WorkflowCommand::SetSongPhase {
                song_id,
                phase: SongPhase::Preproduction,
            },
        ] {
            let result = execute(&store, Actor::admin(), command).await;
            assert!(matches!(
                result,
                Err(WorkflowError::Transition(TransitionError::SongCompleted))
            ));
        }
        assert_eq!(store.song(song_id).phase, SongPhase::Publishing);
    }

    #[tokio::test]
    async fn unknown_records_map_to_not_found() {
        let (store, _) = MemoryStore::with_project();
        let missing = Uuid::new_v4();

        let result = execute(
            &store,
            Actor::admin(),
            WorkflowCommand::AdvanceSongPhase { song_id: missing },
        )
        .await;
        assert!(matches!(result, Err(WorkflowError::SongNotFound)));

        let result = execute(
            &store,
            Actor::member(),
            WorkflowCommand::MoveTask {
                task_id: missing,
                status: TaskStatus::Done,
            },
        )
        .await;
        assert!(matches!(result, Err(WorkflowError::TaskNotFound)));

        let result = execute(
            &store,
            Actor::member(),
            WorkflowCommand::RecalculateProject {
                project_id: missing,
            },
        )
        .await;
        assert!(matches!(result, Err(WorkflowError::ProjectNotFound)));
    }

    #[tokio::test]
    async fn moving_a_task_changes_only_its_status() {
        let (store, project_id) = MemoryStore::with_project();
        store.add_song(project_id, SongPhase::Engineering, SongStatus::Pending);
        let original = store.add_task(project_id, TaskStatus::Todo);
        let task_id = original.id;

        let outcome = execute(
            &store,
            Actor::member(),
            WorkflowCommand::MoveTask {
                task_id,
                status: TaskStatus::Done,
            },
        )
        .await
        .unwrap();
        let WorkflowOutcome::TaskMoved { task } = outcome else {
            panic!("expected TaskMoved, got {outcome:?}");
        };
        assert_eq!(task.status, TaskStatus::Done);

        let outcome = execute(
            &store,
            Actor::member(),
            WorkflowCommand::MoveTask {
                task_id,
                status: TaskStatus::Todo,
            },
        )
        .await
        .unwrap();
        let WorkflowOutcome::TaskMoved { task } = outcome else {
            panic!("expected TaskMoved, got {outcome:?}");
        };
        assert_eq!(task, original);
        assert_eq!(store.project(project_id).progress, 0.0);

        let outcome = execute(
            &store,
            Actor::member(),
            WorkflowCommand::MoveTask {
                task_id,
                status: TaskStatus::Todo,
            },
        )
        .await
        .unwrap();
        assert!(matches!(outcome, WorkflowOutcome::TaskUnchanged { .. }));
    }

    #[tokio::test]
    async fn failed_progress_write_surfaces_store_error() {
        let (store, project_id) = MemoryStore::with_project();
        let song_id = store.add_song(project_id, SongPhase::Preproduction, SongStatus::Pending);
        store.fail_project_writes.store(true, Ordering::SeqCst);

        let result = execute(
            &store,
            Actor::member(),
            WorkflowCommand::AdvanceSongPhase { song_id },
        )
        .await;
        assert!(matches!(result, Err(WorkflowError::Store(_))));
    }

    async fn sqlite_project(db: &DbPool, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        Project::create(db, &CreateProject::named(name), id)
            .await
            .unwrap();
        id
    }

    #[tokio::test]
    async fn service_recomputes_on_add_advance_and_delete() {
        let db = DBService::new_with_url("sqlite::memory:").await.unwrap();
        let service = WorkflowService::new(db.pool.clone());
        let project_id = sqlite_project(&db.pool, "Album").await;

        let first = service
            .add_song(&CreateSong::titled(project_id, "One"))
            .await
            .unwrap();
        assert_eq!(first.project.progress, 0.0);

        let mut later = CreateSong::titled(project_id, "Two");
        later.phase = Some(SongPhase::Publishing);
        let second = service.add_song(&later).await.unwrap();
        assert_eq!(second.project.progress, 37.5);

        let outcome = service
            .execute(
                Actor::member(),
                WorkflowCommand::AdvanceSongPhase {
                    song_id: first.song.id,
                },
            )
            .await
            .unwrap();
        let WorkflowOutcome::SongAdvanced { project, .. } = outcome else {
            panic!("expected SongAdvanced, got {outcome:?}");
        };
        assert_eq!(project.progress, 50.0);

        service
            .execute(
                Actor::admin(),
                WorkflowCommand::CompleteSong {
                    song_id: second.song.id,
                },
            )
            .await
            .unwrap();
        let project = Project::find_by_id(&db.pool, project_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(project.progress, 62.5);

        let project = service.delete_song(first.song.id).await.unwrap();
        assert_eq!(project.progress, 100.0);
        assert_eq!(project.status, ProjectStatus::Completed);

        let project = service.delete_song(second.song.id).await.unwrap();
        assert_eq!(project.progress, 0.0);
        assert_eq!(project.status, ProjectStatus::Active);
    }

    #[tokio::test]
    async fn failed_write_inside_transaction_leaves_no_partial_state() {
        let db = DBService::new_with_url("sqlite::memory:").await.unwrap();
        let project_id = sqlite_project(&db.pool, "Album").await;
        let song_id = Uuid::new_v4();
        Song::create(&db.pool, &CreateSong::titled(project_id, "One"), song_id)
            .await
            .unwrap();

        struct FailingProjectWrites<'a, C>(SeaOrmStore<'a, C>);

        #[async_trait::async_trait]
        impl<'a, C> WorkflowStore for FailingProjectWrites<'a, C>
        where
            C: sea_orm::ConnectionTrait + Send + Sync,
        {
            async fn list_songs(
                &self,
                project_id: Uuid,
            ) -> Result<Vec<SongSnapshot>, crate::StoreError> {
                self.0.list_songs(project_id).await
            }
            async fn find_song(&self, song_id: Uuid) -> Result<Option<Song>, crate::StoreError> {
                self.0.find_song(song_id).await
            }
            async fn update_song(
                &self,
                song_id: Uuid,
                patch: SongPatch,
            ) -> Result<Song, crate::StoreError> {
                self.0.update_song(song_id, patch).await
            }
            async fn update_project_progress(
                &self,
                _project_id: Uuid,
                _progress: f64,
                _status: ProjectStatus,
            ) -> Result<Project, crate::StoreError> {
                Err(crate::StoreError::Database(db::DbErr::Custom(
                    "write rejected".to_string(),
                )))
            }
            async fn find_task(&self, task_id: Uuid) -> Result<Option<Task>, crate::StoreError> {
                self.0.find_task(task_id).await
            }
            async fn update_task_status(
                &self,
                task_id: Uuid,
                status: TaskStatus,
            ) -> Result<Task, crate::StoreError> {
                self.0.update_task_status(task_id, status).await
            }
        }

        let tx = db.pool.begin().await.unwrap();
        let store = FailingProjectWrites(SeaOrmStore::new(&tx));
        let result = execute(
            &store,
            Actor::member(),
            WorkflowCommand::AdvanceSongPhase { song_id },
        )
        .await;
        assert!(matches!(result, Err(WorkflowError::Store(_))));
        // The song row was already written inside the transaction.
        assert_eq!(
            store.find_song(song_id).await.unwrap().unwrap().phase,
            SongPhase::Production
        );
        drop(store);
        tx.rollback().await.unwrap();

        let song = Song::find_by_id(&db.pool, song_id).await.unwrap().unwrap();
        assert_eq!(song.phase, SongPhase::Preproduction);
    }

    #[tokio::test]
    async fn update_song_edits_title_and_phase() {
        let db = DBService::new_with_url("sqlite::memory:").await.unwrap();
        let service = WorkflowService::new(db.pool.clone());
        let project_id = sqlite_project(&db.pool, "Album").await;
        let added = service
            .add_song(&CreateSong::titled(project_id, "Draft"))
            .await
            .unwrap();

        let change = service
            .update_song(
                added.song.id,
                &UpdateSong {
                    title: Some("Final".to_string()),
                    phase: Some(SongPhase::Engineering),
                },
            )
            .await
            .unwrap();
        assert_eq!(change.song.title, "Final");
        assert_eq!(change.song.phase, SongPhase::Engineering);
        assert_eq!(change.project.progress, 50.0);

        let missing = service
            .update_song(Uuid::new_v4(), &UpdateSong::default())
            .await;
        assert!(matches!(missing, Err(WorkflowError::SongNotFound)));
    }

    #[tokio::test]
    async fn update_song_with_phase_on_completed_song_writes_nothing() {
        let db = DBService::new_with_url("sqlite::memory:").await.unwrap();
        let service = WorkflowService::new(db.pool.clone());
        let project_id = sqlite_project(&db.pool, "Album").await;
        let added = service
            .add_song(&CreateSong::titled(project_id, "Draft"))
            .await
            .unwrap();
        service
            .execute(
                Actor::admin(),
                WorkflowCommand::CompleteSong {
                    song_id: added.song.id,
                },
            )
            .await
            .unwrap();

        let rejected = service
            .update_song(
                added.song.id,
                &UpdateSong {
                    title: Some("Renamed".to_string()),
                    phase: Some(SongPhase::Production),
                },
            )
            .await;
        assert!(matches!(
            rejected,
            Err(WorkflowError::Transition(TransitionError::SongCompleted))
        ));
        let song = Song::find_by_id(&db.pool, added.song.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(song.title, "Draft");

        let renamed = service
            .update_song(
                added.song.id,
                &UpdateSong {
                    title: Some("Renamed".to_string()),
                    phase: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.song.title, "Renamed");
        assert_eq!(renamed.song.status, SongStatus::Completed);
        assert_eq!(renamed.project.progress, 100.0);
    }

    #[tokio::test]
    async fn overview_and_board_read_project_state() {
        let db = DBService::new_with_url("sqlite::memory:").await.unwrap();
        let service = WorkflowService::new(db.pool.clone());
        let project_id = sqlite_project(&db.pool, "Album").await;

        let mut song = CreateSong::titled(project_id, "One");
        song.phase = Some(SongPhase::Production);
        service.add_song(&song).await.unwrap();
        BudgetItem::create(
            &db.pool,
            &CreateBudgetItem {
                project_id,
                label: "Studio".to_string(),
                category: "studio".to_string(),
                planned_amount: 100.0,
                spent_amount: 40.0,
            },
            Uuid::new_v4(),
        )
        .await
        .unwrap();
        let task_id = Uuid::new_v4();
        Task::create(&db.pool, &CreateTask::from_title(project_id, "Mix"), task_id)
            .await
            .unwrap();
        service
            .execute(
                Actor::member(),
                WorkflowCommand::MoveTask {
                    task_id,
                    status: TaskStatus::InProgress,
                },
            )
            .await
            .unwrap();

        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let overview = service.overview(project_id, today).await.unwrap();
        assert_eq!(overview.song_count, 1);
        assert_eq!(overview.phases.production, 1);
        assert_eq!(overview.budget.total_spent, 40.0);
        assert_eq!(overview.project.progress, 25.0);

        let board = service.board(project_id).await.unwrap();
        assert_eq!(board.in_progress.len(), 1);
        assert!(board.todo.is_empty());

        assert!(matches!(
            service.overview(Uuid::new_v4(), today).await,
            Err(WorkflowError::ProjectNotFound)
        ));
        assert!(matches!(
            service.board(Uuid::new_v4()).await,
            Err(WorkflowError::ProjectNotFound)
        ));
    }
}

//! Translation between public UUIDs and internal integer row ids.

use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect};
use uuid::Uuid;

use crate::entities::{budget_item, project, song, task, task_comment};

pub async fn project_id_by_uuid<C: ConnectionTrait>(
    db: &C,
    uuid: Uuid,
) -> Result<Option<i64>, DbErr> {
    project::Entity::find()
        .select_only()
        .column(project::Column::Id)
        .filter(project::Column::Uuid.eq(uuid))
        .into_tuple()
        .one(db)
        .await
}

pub async fn project_uuid_by_id<C: ConnectionTrait>(
    db: &C,
    id: i64,
) -> Result<Option<Uuid>, DbErr> {
    project::Entity::find()
        .select_only()
        .column(project::Column::Uuid)
        .filter(project::Column::Id.eq(id))
        .into_tuple()
        .one(db)
        .await
}

pub async fn song_id_by_uuid<C: ConnectionTrait>(
    db: &C,
    uuid: Uuid,
) -> Result<Option<i64>, DbErr> {
    song::Entity::find()
        .select_only()
        .column(song::Column::Id)
        .filter(song::Column::Uuid.eq(uuid))
        .into_tuple()
        .one(db)
        .await
}

pub async fn song_uuid_by_id<C: ConnectionTrait>(
    db: &C,
    id: i64,
) -> Result<Option<Uuid>, DbErr> {
    song::Entity::find()
        .select_only()
        .column(song::Column::Uuid)
        .filter(song::Column::Id.eq(id))
        .into_tuple()
        .one(db)
        .await
}

pub async fn task_id_by_uuid<C: ConnectionTrait>(
    db: &C,
    uuid: Uuid,
) -> Result<Option<i64>, DbErr> {
    task::Entity::find()
        .select_only()
        .column(task::Column::Id)
        .filter(task::Column::Uuid.eq(uuid))
        .into_tuple()
        .one(db)
        .await
}

pub async fn task_uuid_by_id<C: ConnectionTrait>(
    db: &C,
    id: i64,
) -> Result<Option<Uuid>, DbErr> {
    task::Entity::find()
        .select_only()
        .column(task::Column::Uuid)
        .filter(task::Column::Id.eq(id))
        .into_tuple()
        .one(db)
        .await
}

pub async fn budget_item_id_by_uuid<C: ConnectionTrait>(
    db: &C,
    uuid: Uuid,
) -> Result<Option<i64>, DbErr> {
    budget_item::Entity::find()
        .select_only()
        .column(budget_item::Column::Id)
        .filter(budget_item::Column::Uuid.eq(uuid))
        .into_tuple()
        .one(db)
        .await
}

pub async fn comment_id_by_uuid<C: ConnectionTrait>(
    db: &C,
    uuid: Uuid,
) -> Result<Option<i64>, DbErr> {
    task_comment::Entity::find()
        .select_only()
        .column(task_comment::Column::Id)
        .filter(task_comment::Column::Uuid.eq(uuid))
        .into_tuple()
        .one(db)
        .await
}

/// Resolves a project UUID to its row id, failing with `RecordNotFound`.
pub async fn require_project_id<C: ConnectionTrait>(db: &C, uuid: Uuid) -> Result<i64, DbErr> {
    project_id_by_uuid(db, uuid)
        .await?
        .ok_or(DbErr::RecordNotFound("Project not found".to_string()))
}

pub async fn require_project_uuid<C: ConnectionTrait>(db: &C, id: i64) -> Result<Uuid, DbErr> {
    project_uuid_by_id(db, id)
        .await?
        .ok_or(DbErr::RecordNotFound("Project not found".to_string()))
}

#[cfg(test)]
mod tests {
    use crate::{
        models::{
            project::{CreateProject, Project},
            song::{CreateSong, Song},
        },
        test_db::setup_db,
    };

    use super::*;

    #[tokio::test]
    async fn ids_roundtrip_and_uuid_resolution() {
        let db = setup_db().await;

        let project_id = Uuid::new_v4();
        let project = Project::create(&db, &CreateProject::named("Debut EP"), project_id)
            .await
            .unwrap();
        assert_eq!(project.id, project_id);

        let project_row_id = project_id_by_uuid(&db, project_id)
            .await
            .unwrap()
            .expect("project row id");
        assert_eq!(
            project_uuid_by_id(&db, project_row_id).await.unwrap(),
            Some(project_id)
        );

        let song_id = Uuid::new_v4();
        let song = Song::create(&db, &CreateSong::titled(project_id, "Opening track"), song_id)
            .await
            .unwrap();
        assert_eq!(song.project_id, project_id);

        let song_row_id = song_id_by_uuid(&db, song_id)
            .await
            .unwrap()
            .expect("song row id");
        assert_eq!(song_uuid_by_id(&db, song_row_id).await.unwrap(), Some(song_id));
    }

    #[tokio::test]
    async fn unknown_uuids_resolve_to_none() {
        let db = setup_db().await;
        assert_eq!(project_id_by_uuid(&db, Uuid::new_v4()).await.unwrap(), None);
        assert_eq!(task_id_by_uuid(&db, Uuid::new_v4()).await.unwrap(), None);
        assert!(matches!(
            require_project_id(&db, Uuid::new_v4()).await,
            Err(DbErr::RecordNotFound(_))
        ));
    }
}

use sea_orm_migration::prelude::*;

use crate::m20250101000000_baseline::{
    Projects, Tasks, fk_id_col, pk_id_col, timestamp_col, uuid_col,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .if_not_exists()
                    .table(BudgetItems::Table)
                    .col(pk_id_col(manager, BudgetItems::Id))
                    .col(uuid_col(BudgetItems::Uuid))
                    .col(fk_id_col(manager, BudgetItems::ProjectId))
                    .col(ColumnDef::new(BudgetItems::Label).string().not_null())
                    .col(
                        ColumnDef::new(BudgetItems::Category)
                            .string_len(64)
                            .not_null()
                            .default(Expr::val("")),
                    )
                    .col(
                        ColumnDef::new(BudgetItems::PlannedAmount)
                            .double()
                            .not_null()
                            .default(Expr::val(0.0)),
                    )
                    .col(
                        ColumnDef::new(BudgetItems::SpentAmount)
                            .double()
                            .not_null()
                            .default(Expr::val(0.0)),
                    )
                    .col(timestamp_col(BudgetItems::CreatedAt))
                    .col(timestamp_col(BudgetItems::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_budget_items_project_id")
                            .from(BudgetItems::Table, BudgetItems::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_budget_items_uuid")
                    .table(BudgetItems::Table)
                    .col(BudgetItems::Uuid)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_budget_items_project_id")
                    .table(BudgetItems::Table)
                    .col(BudgetItems::ProjectId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .if_not_exists()
                    .table(TaskComments::Table)
                    .col(pk_id_col(manager, TaskComments::Id))
                    .col(uuid_col(TaskComments::Uuid))
                    .col(fk_id_col(manager, TaskComments::TaskId))
                    .col(ColumnDef::new(TaskComments::Author).string().not_null())
                    .col(ColumnDef::new(TaskComments::Body).text().not_null())
                    .col(timestamp_col(TaskComments::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_task_comments_task_id")
                            .from(TaskComments::Table, TaskComments::TaskId)
                            .to(Tasks::Table, Tasks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_task_comments_uuid")
                    .table(TaskComments::Table)
                    .col(TaskComments::Uuid)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_task_comments_task_id")
                    .table(TaskComments::Table)
                    .col(TaskComments::TaskId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TaskComments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BudgetItems::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Iden)]
enum BudgetItems {
    Table,
    Id,
    Uuid,
    ProjectId,
    Label,
    Category,
    PlannedAmount,
    SpentAmount,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum TaskComments {
    Table,
    Id,
    Uuid,
    TaskId,
    Author,
    Body,
    CreatedAt,
}

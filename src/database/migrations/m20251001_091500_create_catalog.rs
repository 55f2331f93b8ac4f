use sea_orm_migration::{
    prelude::*,
    schema::{
        big_integer, boolean, integer, integer_null, pk_auto, string, string_len,
        string_len_null, timestamp_with_time_zone, timestamp_with_time_zone_null, uuid,
    },
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CatalogEntry::Table)
                    .if_not_exists()
                    .col(pk_auto(CatalogEntry::Id))
                    .col(string_len(CatalogEntry::Tier, 16))
                    .col(string(CatalogEntry::Code))
                    .col(string(CatalogEntry::Name))
                    .col(string_len_null(CatalogEntry::Stream, 16))
                    .col(integer_null(CatalogEntry::SeatsAvailable))
                    .col(integer_null(CatalogEntry::SeatsBuffer))
                    .col(timestamp_with_time_zone_null(CatalogEntry::EntranceExamAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-catalog_entry-tier-code")
                    .table(CatalogEntry::Table)
                    .col(CatalogEntry::Tier)
                    .col(CatalogEntry::Code)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CatalogLink::Table)
                    .if_not_exists()
                    .col(integer(CatalogLink::ParentId))
                    .col(integer(CatalogLink::ChildId))
                    .primary_key(
                        Index::create()
                            .col(CatalogLink::ParentId)
                            .col(CatalogLink::ChildId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-catalog_link-parent_id")
                            .from(CatalogLink::Table, CatalogLink::ParentId)
                            .to(CatalogEntry::Table, CatalogEntry::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-catalog_link-child_id")
                            .from(CatalogLink::Table, CatalogLink::ChildId)
                            .to(CatalogEntry::Table, CatalogEntry::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-catalog_link-child_id")
                    .table(CatalogLink::Table)
                    .col(CatalogLink::ChildId)
                    .to_owned(),
            )
            .await?;

        let mut course_application = Table::create();
        course_application
            .table(CourseApplication::Table)
            .if_not_exists()
            .col(pk_auto(CourseApplication::Id))
            .col(uuid(CourseApplication::AccountId));

        for column in CourseApplication::SELECTIONS {
            course_application.col(integer_null(column));
        }

        course_application
            .col(big_integer(CourseApplication::FeeAmount).default(0))
            .col(boolean(CourseApplication::IsFeePaid).default(false))
            .col(timestamp_with_time_zone(CourseApplication::CreatedAt))
            .col(timestamp_with_time_zone(CourseApplication::UpdatedAt))
            .foreign_key(
                ForeignKey::create()
                    .name("fk-course_application-account_id")
                    .from(CourseApplication::Table, CourseApplication::AccountId)
                    .to(Account::Table, Account::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            );

        for column in CourseApplication::SELECTIONS {
            course_application.foreign_key(
                ForeignKey::create()
                    .name(format!("fk-course_application-{}", column.to_string()))
                    .from(CourseApplication::Table, column)
                    .to(CatalogEntry::Table, CatalogEntry::Id)
                    .on_delete(ForeignKeyAction::SetNull),
            );
        }

        manager.create_table(course_application.to_owned()).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-course_application-account_id")
                    .table(CourseApplication::Table)
                    .col(CourseApplication::AccountId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CourseApplication::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CatalogLink::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CatalogEntry::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Account {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum CatalogEntry {
    Table,
    Id,
    Tier,
    Code,
    Name,
    Stream,
    SeatsAvailable,
    SeatsBuffer,
    EntranceExamAt,
}

#[derive(DeriveIden)]
enum CatalogLink {
    Table,
    ParentId,
    ChildId,
}

#[derive(DeriveIden, Clone, Copy)]
enum CourseApplication {
    Table,
    Id,
    AccountId,
    DegreeId,
    ProgramId,
    MajorId,
    MinorId,
    MdcId,
    VacId,
    AecId,
    AocId,
    FeeAmount,
    IsFeePaid,
    CreatedAt,
    UpdatedAt,
}

impl CourseApplication {
    const SELECTIONS: [Self; 8] = [
        Self::DegreeId,
        Self::ProgramId,
        Self::MajorId,
        Self::MinorId,
        Self::MdcId,
        Self::VacId,
        Self::AecId,
        Self::AocId,
    ];
}

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 qrcodes 表
        manager
            .create_table(
                Table::create()
                    .table(QrCodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QrCodes::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(QrCodes::UserId).string_len(36).not_null())
                    .col(ColumnDef::new(QrCodes::Type).string_len(16).not_null())
                    .col(ColumnDef::new(QrCodes::ShortCode).string_len(32).not_null())
                    .col(ColumnDef::new(QrCodes::TargetUrl).text().not_null())
                    .col(
                        ColumnDef::new(QrCodes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(QrCodes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 短码唯一性由存储层保证
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_qrcodes_short_code")
                    .table(QrCodes::Table)
                    .col(QrCodes::ShortCode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 仪表盘列表：按用户 + 创建时间
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_qrcodes_user_created")
                    .table(QrCodes::Table)
                    .col(QrCodes::UserId)
                    .col(QrCodes::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_qrcodes_user_created").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_qrcodes_short_code").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(QrCodes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum QrCodes {
    #[sea_orm(iden = "qrcodes")]
    Table,
    Id,
    UserId,
    Type,
    ShortCode,
    TargetUrl,
    CreatedAt,
    UpdatedAt,
}

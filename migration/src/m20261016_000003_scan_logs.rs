//! 扫码日志表迁移
//!
//! scan_logs 只追加，不更新：
//! - qrcode_id
//! - 扫码时间
//! - 客户端 IP 与 User-Agent

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ScanLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScanLogs::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ScanLogs::QrcodeId).string_len(36).not_null())
                    .col(
                        ColumnDef::new(ScanLogs::ScannedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ScanLogs::IpAddress).string_len(64).not_null())
                    .col(ColumnDef::new(ScanLogs::UserAgent).text().not_null())
                    .to_owned(),
            )
            .await?;

        // 复合索引（单码时间窗口查询）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_scan_logs_qrcode_time")
                    .table(ScanLogs::Table)
                    .col(ScanLogs::QrcodeId)
                    .col(ScanLogs::ScannedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_scan_logs_qrcode_time").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ScanLogs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ScanLogs {
    #[sea_orm(iden = "scan_logs")]
    Table,
    Id,
    QrcodeId,
    ScannedAt,
    IpAddress,
    UserAgent,
}

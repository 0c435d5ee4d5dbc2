use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use vx_api_rest::{
    context::{
        ApiRestCtx, ApiRestDaoCtx, ApiRestMailerCtx, ApiRestSmsCtx, ApiRestTokenCtx,
        ApiRestUploadCtx,
    },
    ApiRestServer,
};
use vx_dao::{admin::AdminDao, Db};
use vx_db_postgresql::db::PostgresDb;
use vx_db_sqlite::db::SqliteDb;
use vx_mailer::Mailer;
use vx_sms::SmsClient;
use vx_token_jwt::token::JwtToken;

mod config_path;

#[tokio::main]
async fn main() {
    let config_path = config_path::get();
    let config = vx_config::from_path(&config_path);

    vx_log::init(config.log().display_level(), config.log().level_filter());

    vx_log::info(Some("🚀"), "[Vortext] Starting");

    let jwt_token = JwtToken::new(
        config.token().jwt().secret(),
        config.token().jwt().expiry_duration(),
    );

    let (mailer, mailer_ctx) = match config.mailer() {
        Some(config_mailer) => match Mailer::new(
            config_mailer.smtp_host(),
            config_mailer.smtp_username(),
            config_mailer.smtp_password(),
            config_mailer.sender_name(),
            config_mailer.sender_email(),
            config_mailer.timeout(),
        ) {
            Ok((mailer, mailer_sender)) => (
                Some(mailer),
                Some(ApiRestMailerCtx::new(
                    mailer_sender,
                    config_mailer.notify_email(),
                )),
            ),
            Err(err) => vx_log::panic(None, format!("[Vortext] Mailer setup failed: {err}")),
        },
        None => {
            vx_log::warn(
                None,
                "[Vortext] No mailer configured, outgoing emails are disabled",
            );
            (None, None)
        }
    };

    let (sms_client, sms_ctx) = match config.sms() {
        Some(config_sms) => match SmsClient::new(
            config_sms.api_base(),
            config_sms.account_sid(),
            config_sms.auth_token(),
            config_sms.from_number(),
            config_sms.recipients(),
            config_sms.default_country_code(),
            config_sms.timeout(),
        ) {
            Ok((sms_client, sms_sender)) => {
                (Some(sms_client), Some(ApiRestSmsCtx::new(sms_sender)))
            }
            Err(err) => vx_log::panic(None, format!("[Vortext] SMS client setup failed: {err}")),
        },
        None => (None, None),
    };

    let db = if let Some(sqlite) = config.db().sqlite() {
        match SqliteDb::new(
            sqlite.path(),
            sqlite.max_connections(),
            config.db().query_timeout(),
        )
        .await
        {
            Ok(db) => Arc::new(Db::SqliteDb(db)),
            Err(err) => vx_log::panic(None, format!("[Vortext] SQLite setup failed: {err}")),
        }
    } else if let Some(postgres) = config.db().postgres() {
        match PostgresDb::new(
            postgres.user(),
            postgres.password(),
            postgres.host(),
            postgres.port(),
            postgres.db_name(),
            postgres.max_connections(),
            config.db().query_timeout(),
        )
        .await
        {
            Ok(db) => Arc::new(Db::PostgresqlDb(db)),
            Err(err) => vx_log::panic(None, format!("[Vortext] PostgreSQL setup failed: {err}")),
        }
    } else {
        vx_log::panic(None, "[Vortext] No database configuration is specified");
    };

    for admin in config.auth().admins() {
        match AdminDao::new(admin.email(), admin.role())
            .db_insert_if_absent(&db)
            .await
        {
            Ok(true) => vx_log::info(None, format!("[Vortext] Seeded admin {}", admin.email())),
            Ok(false) => vx_log::debug(
                None,
                format!("[Vortext] Admin {} already exists", admin.email()),
            ),
            Err(err) => vx_log::panic(
                None,
                format!("[Vortext] Seeding admin {} failed: {err}", admin.email()),
            ),
        }
    }

    if let Err(err) = tokio::fs::create_dir_all(config.upload().path()).await {
        vx_log::panic(
            None,
            format!(
                "[Vortext] Upload directory {} is not usable: {err}",
                config.upload().path()
            ),
        );
    }

    let api_rest_server = ApiRestServer::new(
        config.api().rest().host(),
        config.api().rest().port(),
        config.api().rest().allowed_origin(),
        ApiRestCtx::new(
            config.app().mode(),
            ApiRestTokenCtx::new(jwt_token),
            mailer_ctx,
            sms_ctx,
            ApiRestDaoCtx::new(db),
            ApiRestUploadCtx::new(
                config.upload().path(),
                config.upload().public_path(),
                config.upload().max_size(),
            ),
            config.auth().otp_ttl(),
        ),
    );

    let cancel_token = CancellationToken::new();

    tokio::spawn({
        let cancel_token = cancel_token.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                vx_log::info(None, "[Vortext] Received shutdown signal");
            }
            cancel_token.cancel();
        }
    });

    match tokio::try_join!(
        async {
            match mailer {
                Some(mailer) => mailer.run(cancel_token.clone()).await,
                None => Mailer::run_none().await,
            }
        },
        async {
            match sms_client {
                Some(sms_client) => sms_client.run(cancel_token.clone()).await,
                None => SmsClient::run_none().await,
            }
        },
        api_rest_server.run(cancel_token.clone())
    ) {
        Ok(_) => vx_log::info(Some("👋"), "[Vortext] Turned off"),
        Err(err) => {
            vx_log::warn(None, "[Vortext] Shutting down all running components");
            cancel_token.cancel();
            vx_log::warn(
                Some("👋"),
                format!("[Vortext] Turned off with error: {err}"),
            );
        }
    }
}

use std::{sync::Arc, time::Duration};

use vx_config::app::AppConfigMode;
use vx_dao::Db;
use vx_mailer::MailSender;
use vx_sms::SmsSender;
use vx_token_jwt::token::JwtToken;

pub struct ApiRestCtx {
    mode: AppConfigMode,
    token: ApiRestTokenCtx,
    mailer: Option<ApiRestMailerCtx>,
    sms: Option<ApiRestSmsCtx>,
    dao: ApiRestDaoCtx,
    upload: ApiRestUploadCtx,
    otp_ttl: Duration,
}

impl ApiRestCtx {
    pub fn new(
        mode: &AppConfigMode,
        token: ApiRestTokenCtx,
        mailer: Option<ApiRestMailerCtx>,
        sms: Option<ApiRestSmsCtx>,
        dao: ApiRestDaoCtx,
        upload: ApiRestUploadCtx,
        otp_ttl: &Duration,
    ) -> Self {
        Self {
            mode: *mode,
            token,
            mailer,
            sms,
            dao,
            upload,
            otp_ttl: *otp_ttl,
        }
    }

    pub fn mode(&self) -> &AppConfigMode {
        &self.mode
    }

    pub fn token(&self) -> &ApiRestTokenCtx {
        &self.token
    }

    pub fn mailer(&self) -> &Option<ApiRestMailerCtx> {
        &self.mailer
    }

    pub fn sms(&self) -> &Option<ApiRestSmsCtx> {
        &self.sms
    }

    pub fn dao(&self) -> &ApiRestDaoCtx {
        &self.dao
    }

    pub fn upload(&self) -> &ApiRestUploadCtx {
        &self.upload
    }

    pub fn otp_ttl(&self) -> &Duration {
        &self.otp_ttl
    }
}

pub struct ApiRestTokenCtx {
    jwt: JwtToken,
}

impl ApiRestTokenCtx {
    pub fn new(jwt: JwtToken) -> Self {
        Self { jwt }
    }

    pub fn jwt(&self) -> &JwtToken {
        &self.jwt
    }
}

pub struct ApiRestMailerCtx {
    sender: MailSender,
    notify_email: Option<String>,
}

impl ApiRestMailerCtx {
    pub fn new(sender: MailSender, notify_email: &Option<String>) -> Self {
        Self {
            sender,
            notify_email: notify_email.clone(),
        }
    }

    pub fn sender(&self) -> &MailSender {
        &self.sender
    }

    /// Inbox that receives a copy of every contact-form submission.
    pub fn notify_email(&self) -> &Option<String> {
        &self.notify_email
    }
}

pub struct ApiRestSmsCtx {
    sender: SmsSender,
}

impl ApiRestSmsCtx {
    pub fn new(sender: SmsSender) -> Self {
        Self { sender }
    }

    pub fn sender(&self) -> &SmsSender {
        &self.sender
    }
}

pub struct ApiRestDaoCtx {
    db: Arc<Db>,
}

impl ApiRestDaoCtx {
    pub fn new(db: Arc<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Db {
        &self.db
    }
}

pub struct ApiRestUploadCtx {
    path: String,
    public_path: String,
    max_size: usize,
}

impl ApiRestUploadCtx {
    pub fn new(path: &str, public_path: &str, max_size: &usize) -> Self {
        Self {
            path: path.to_owned(),
            public_path: public_path.to_owned(),
            max_size: *max_size,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn public_path(&self) -> &str {
        &self.public_path
    }

    pub fn max_size(&self) -> &usize {
        &self.max_size
    }
}

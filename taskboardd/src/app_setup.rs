use std::error::Error;
use std::path::Path;
use async_trait::async_trait;
use josekit::jwk::Jwk;
use log::{error, info};
use rocket::fairing::{Fairing, Info};
use rocket::{Build, Orbit, Rocket};
use taskboard::access_token::{AccessTokenDecoder, AccessTokenGenerator};
use taskboard::auth::ProductionAuthService;
use taskboard::config::app_config::AppConfig;
use taskboard::db::DbPool;
use taskboard::hasher::ProductionHasher;
use taskboard::service::{CommentService, Limits, MemberService, ProjectService, TaskService, WorkspaceService};
use crate::routes::ApiRocketBuildExt;

pub struct AppSetupFairing;

macro_rules! ok_or_bail {
    ($rocket:ident, $expr:expr, |$e:ident| $error_logger:expr) => ({
        match $expr {
            std::result::Result::Ok(ok) => ok,
            std::result::Result::Err(e) => {
                let $e = e;
                $error_logger;
                return std::result::Result::Err($rocket);
            },
        }
    });
}

#[async_trait]
impl Fairing for AppSetupFairing {
    fn info(&self) -> Info {
        use rocket::fairing::Kind;
        Info {
            name: "app setup",
            kind: Kind::Ignite | Kind::Shutdown,
        }
    }

    async fn on_ignite(
        &self,
        rocket: Rocket<Build>,
    ) -> rocket::fairing::Result {
        let app_config = rocket.figment().extract::<AppConfig>();
        let app_config = ok_or_bail!(
            rocket,
            app_config,
            |e| error!("failed to read app configuration: {e}")
        );

        let db = ok_or_bail!(
            rocket,
            DbPool::connect(&app_config.database_url).await,
            |e| error!("failed to open database at {}: {e}", app_config.database_url)
        );

        let jwt_key = ok_or_bail!(
            rocket,
            read_jwt_key(&app_config.jwt_key),
            |e| error!("failed reading the jwt key at {}: {e}", app_config.jwt_key.display())
        );
        let token_generator = ok_or_bail!(
            rocket,
            AccessTokenGenerator::from_jwk(&jwt_key),
            |e| error!("could not initialize access token generator: {e}")
        );
        let token_decoder = ok_or_bail!(
            rocket,
            AccessTokenDecoder::from_jwk(&jwt_key),
            |e| error!("could not initialize access token decoder: {e}")
        );
        let hasher = ok_or_bail!(
            rocket,
            ProductionHasher::new(&app_config.hasher_config),
            |e| error!("could not initialize password hasher: {e}")
        );

        let auth_service = ProductionAuthService::new(
            db.clone(),
            hasher,
            token_generator,
            token_decoder,
            &app_config,
        );
        let limits = Limits::from(&app_config);

        info!("application state set up");
        Ok(
            rocket
                .manage(auth_service)
                .manage(WorkspaceService::new(db.clone(), limits))
                .manage(MemberService::new(db.clone()))
                .manage(ProjectService::new(db.clone(), limits))
                .manage(TaskService::new(db.clone(), limits))
                .manage(CommentService::new(db.clone(), limits))
                .manage(db)
                .install_taskboard_api()
        )
    }

    async fn on_shutdown(&self, rocket: &Rocket<Orbit>) {
        if let Some(db) = rocket.state::<DbPool>() {
            info!("closing the database");
            db.close().await;
        }
    }
}

fn read_jwt_key(path: &Path) -> Result<Jwk, Box<dyn Error>> {
    Ok(Jwk::from_bytes(std::fs::read(path)?)?)
}

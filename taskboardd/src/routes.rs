mod auth;
mod authentication_guard;
mod catchers;
mod comments;
mod errors;
mod members;
mod projects;
mod tasks;
mod workspaces;

use rocket::{Build, Rocket};

pub trait ApiRocketBuildExt {
    fn install_taskboard_api(self) -> Self;
}

impl ApiRocketBuildExt for Rocket<Build> {
    fn install_taskboard_api(self) -> Self {
        self.mount("/auth", auth::auth_routes())
            .mount(
                "/workspaces",
                [
                    workspaces::workspace_routes(),
                    members::member_routes(),
                    projects::project_routes(),
                    tasks::task_routes(),
                    comments::comment_routes(),
                ].concat(),
            )
            .register("/", catchers::api_catchers())
    }
}

mod helpers;
mod login_service;

pub use helpers::{
    SetupError, configure_postgresql, configure_redis, get_postgres_pool, get_redis_client,
};
pub use login_service::LoginService;

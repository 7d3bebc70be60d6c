//! Builders wiring repositories and security adapters into the HTTP state.

use std::io;
use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};
use zeroize::Zeroizing;

use complaints::config::AdminSeed;
use complaints::domain::ports::{
    ComplaintRepository, PasswordHasher, TokenService, UserRepository,
};
use complaints::domain::{
    ComplaintService, NewAdmin, NewPassword, PasswordLoginService, StudentAccountsService,
};
use complaints::inbound::http::state::{HttpState, HttpStatePorts};
use complaints::outbound::memory::{InMemoryComplaintRepository, InMemoryUserRepository};
use complaints::outbound::persistence::{DieselComplaintRepository, DieselUserRepository};
use complaints::outbound::security::{Argon2PasswordHasher, JwtTokenService};

use super::ServerConfig;

async fn seed_admin<U>(students: &StudentAccountsService<U>, seed: &AdminSeed) -> io::Result<()>
where
    U: UserRepository,
{
    let invalid = |error: &dyn std::fmt::Display| {
        io::Error::new(io::ErrorKind::InvalidInput, format!("admin seed: {error}"))
    };
    let admin = NewAdmin::try_from_parts(&seed.email, &seed.name).map_err(|err| invalid(&err))?;
    let password = NewPassword::new(&seed.password).map_err(|err| invalid(&err))?;
    match students.ensure_admin(admin, password).await {
        Ok(Some(user)) => info!(user_id = %user.id, "administrator seeded"),
        Ok(None) => info!("administrator already registered"),
        Err(error) => return Err(io::Error::other(format!("seed administrator: {error}"))),
    }
    Ok(())
}

/// Assemble every driving port over the given repositories, creating the
/// configured administrator first.
async fn build_ports<U, C>(
    users: Arc<U>,
    complaints: Arc<C>,
    jwt_secret: Zeroizing<Vec<u8>>,
    admin_seed: Option<&AdminSeed>,
) -> io::Result<HttpStatePorts>
where
    U: UserRepository + 'static,
    C: ComplaintRepository + 'static,
{
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::new());
    let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(jwt_secret, clock.clone()));

    let login = Arc::new(PasswordLoginService::new(
        users.clone(),
        hasher.clone(),
        tokens.clone(),
    ));
    let students = Arc::new(StudentAccountsService::new(
        users.clone(),
        hasher,
        clock.clone(),
    ));
    if let Some(seed) = admin_seed {
        seed_admin(&students, seed).await?;
    }
    let complaint_service = Arc::new(ComplaintService::new(complaints, users, clock));

    Ok(HttpStatePorts {
        login,
        tokens,
        students: students.clone(),
        students_query: students,
        complaints: complaint_service.clone(),
        complaints_query: complaint_service,
    })
}

/// Build the shared HTTP state from the configured store.
///
/// # Errors
/// Fails when the configured administrator cannot be created.
pub(super) async fn build_http_state(config: &ServerConfig) -> io::Result<web::Data<HttpState>> {
    let jwt_secret = config.jwt_secret.clone();
    let admin_seed = config.admin_seed.as_ref();
    let ports = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL repositories");
            build_ports(
                Arc::new(DieselUserRepository::new(pool.clone())),
                Arc::new(DieselComplaintRepository::new(pool.clone())),
                jwt_secret,
                admin_seed,
            )
            .await?
        }
        None => {
            info!("using in-memory repositories");
            if admin_seed.is_none() {
                warn!(
                    "no ADMIN_EMAIL/ADMIN_PASSWORD set; the in-memory store starts without an administrator"
                );
            }
            build_ports(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryComplaintRepository::new()),
                jwt_secret,
                admin_seed,
            )
            .await?
        }
    };
    Ok(web::Data::new(HttpState::new(ports)))
}

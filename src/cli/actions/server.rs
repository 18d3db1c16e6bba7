use crate::cli::actions::Action;
use crate::portal::{self, handlers::session::CookieConfig, PortalState};
use crate::upstream::UpstreamClient;
use anyhow::Result;
use url::Url;

/// Handle the server action
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server {
            port,
            upstream_url,
            secure_cookies,
        } => {
            let base_url = Url::parse(&upstream_url)?;

            let upstream = UpstreamClient::new(base_url)?;

            let state = PortalState {
                upstream,
                cookies: CookieConfig {
                    secure: secure_cookies,
                },
            };

            portal::new(port, state).await?;
        }
    }

    Ok(())
}

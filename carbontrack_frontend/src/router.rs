use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    CarbonTracker,
    Community,
    Auth,
    Location,
    Comments { post_id: String },
}

impl Route {
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim();
        let trimmed = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };
        match trimmed {
            "/" | "" => Some(Route::Home),
            "/carbontracker" => Some(Route::CarbonTracker),
            "/community" => Some(Route::Community),
            "/authpage" => Some(Route::Auth),
            "/location" => Some(Route::Location),
            other => {
                let post_id = other.strip_prefix("/comments/")?;
                if post_id.is_empty() || post_id.contains('/') {
                    return None;
                }
                Some(Route::Comments {
                    post_id: post_id.to_string(),
                })
            }
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".into(),
            Route::CarbonTracker => "/carbontracker".into(),
            Route::Community => "/community".into(),
            Route::Auth => "/authpage".into(),
            Route::Location => "/location".into(),
            Route::Comments { post_id } => format!("/comments/{post_id}"),
        }
    }

    pub fn requires_session(&self) -> bool {
        matches!(self, Route::Community | Route::Comments { .. })
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

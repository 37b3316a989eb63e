use touchless_core::SceneKind;

/// Hash routes. Anything unrecognised lands on the menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Landing,
    Scene(SceneKind),
}

impl Route {
    pub const ALL: [Route; 4] = [
        Route::Landing,
        Route::Scene(SceneKind::Solar),
        Route::Scene(SceneKind::Anatomy),
        Route::Scene(SceneKind::Chemistry),
    ];

    pub fn from_hash(hash: &str) -> Route {
        let path = hash.trim_start_matches('#').trim_start_matches('/');
        let path = path.trim_end_matches('/');
        SceneKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(path))
            .map_or(Route::Landing, Route::Scene)
    }

    pub fn as_hash(self) -> &'static str {
        match self {
            Route::Landing => "#/",
            Route::Scene(SceneKind::Solar) => "#/solar",
            Route::Scene(SceneKind::Anatomy) => "#/anatomy",
            Route::Scene(SceneKind::Chemistry) => "#/chemistry",
        }
    }

    /// Id of the menu button that navigates here.
    pub fn button_id(self) -> &'static str {
        match self {
            Route::Landing => "btn-home",
            Route::Scene(SceneKind::Solar) => "btn-solar",
            Route::Scene(SceneKind::Anatomy) => "btn-anatomy",
            Route::Scene(SceneKind::Chemistry) => "btn-chemistry",
        }
    }

    #[inline]
    pub fn scene(self) -> Option<SceneKind> {
        match self {
            Route::Landing => None,
            Route::Scene(kind) => Some(kind),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Landing => "Touchless",
            Route::Scene(SceneKind::Solar) => "Solar System",
            Route::Scene(SceneKind::Anatomy) => "Anatomy",
            Route::Scene(SceneKind::Chemistry) => "Chemistry Lab",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Home,
    Reset,
}

#[inline]
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    match key {
        "Escape" => Some(KeyAction::Home),
        "r" | "R" => Some(KeyAction::Reset),
        _ => None,
    }
}

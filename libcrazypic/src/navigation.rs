//! The routing seam between the controllers and whatever front end displays them

/// The route that is shown when a requested object does not exist
pub const NOT_FOUND_ROUTE: &str = "404";

/// Something that can switch between views
pub trait Navigator {
    /// Show the view for the given route
    fn navigate(&mut self, route: &str);

    /// Go back to the view that was shown before the current one
    fn previous_state(&mut self);
}

/// A single navigation step recorded by [NavigationLog]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    To(String),
    Back,
}

/// A [Navigator] that only records where it was asked to go. Useful for front ends
/// without real views and for tests.
#[derive(Debug, Default, Clone)]
pub struct NavigationLog {
    steps: Vec<Navigation>,
}

impl NavigationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[Navigation] {
        &self.steps
    }

    pub fn last(&self) -> Option<&Navigation> {
        self.steps.last()
    }

    /// Whether the navigator was sent to the not-found route
    pub fn hit_not_found(&self) -> bool {
        self.steps
            .iter()
            .any(|s| matches!(s, Navigation::To(route) if route == NOT_FOUND_ROUTE))
    }
}

impl Navigator for NavigationLog {
    fn navigate(&mut self, route: &str) {
        self.steps.push(Navigation::To(route.to_string()));
    }

    fn previous_state(&mut self) {
        self.steps.push(Navigation::Back);
    }
}

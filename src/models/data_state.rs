/// Availability of a fetched snapshot.
///
/// `Unavailable` is only reached when nothing has ever been received; a failed
/// refresh after a success keeps the previous `Ready` value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DataState<T> {
    #[default]
    Loading,
    Unavailable,
    Ready(T),
}

impl<T> DataState<T> {
    #[must_use]
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Loading | Self::Unavailable => None,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Fold a refresh result into the current state
    ///
    /// # Errors
    ///
    /// Hands back the refresh error so the caller can log it
    pub fn refresh(&mut self, result: Result<T, String>) -> Result<(), String> {
        match result {
            Ok(value) => {
                *self = Self::Ready(value);
                Ok(())
            }
            Err(e) => {
                if !matches!(self, Self::Ready(_)) {
                    *self = Self::Unavailable;
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_loading() {
        let state: DataState<u32> = DataState::default();
        assert!(state.is_loading());
        assert_eq!(state.ready(), None);
    }

    #[test]
    fn test_first_failure_is_unavailable() {
        let mut state: DataState<u32> = DataState::default();
        assert!(state.refresh(Err("offline".to_string())).is_err());
        assert_eq!(state, DataState::Unavailable);
    }

    #[test]
    fn test_failure_after_success_keeps_previous() {
        let mut state = DataState::default();
        assert!(state.refresh(Ok(7)).is_ok());
        assert!(state.refresh(Err("timeout".to_string())).is_err());
        assert_eq!(state.ready(), Some(&7));
    }

    #[test]
    fn test_recovers_from_unavailable() {
        let mut state = DataState::Unavailable;
        assert!(state.refresh(Ok("ok")).is_ok());
        assert_eq!(state, DataState::Ready("ok"));
    }
}

//! The session store: who is logged in, kept in step with storage and the server.
//!
//! SYSTEM CONTEXT
//! ==============
//! Created once by the root component and shared through context. Pages read
//! its state; login/register/logout are the only writers, plus the gateway's
//! teardown, which reaches `logout` through the callback wired in
//! [`SessionStore::new`]. The gateway also reads the credential it attaches
//! from this store's state, so storage is only a mirror.
//!
//! BOOTSTRAP
//! =========
//! Restoring from storage is two-phase. The persisted session is installed
//! immediately but unverified, so the UI renders as logged in without a flash
//! of the sign-in page; `/users/me` then confirms it (refreshing the user
//! record) or the session is dropped. `is_loading` stays true until that
//! answer arrives.
//!
//! Single-threaded: no borrow of the state is held across an `.await`.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, info, warn};

use super::persistence::{KeyValueStore, Persistence};
use crate::config::ClientConfig;
use crate::net::auth;
use crate::net::errors::AuthError;
use crate::net::gateway::Gateway;
use crate::net::http::Transport;
use crate::net::types::{AuthResponse, Credential, LoginRequest, RegisterRequest, User};
use crate::util::navigation::Navigator;

/// A user record paired with the credential that authorizes it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub user: User,
    pub credential: Credential,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Before `bootstrap` has started.
    #[default]
    Uninitialized,
    /// `bootstrap` is reading storage.
    Loading,
    /// `verified` is false while a restored session awaits server confirmation.
    Authenticated { session: Session, verified: bool },
    Unauthenticated,
}

impl SessionState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated { session, .. } => Some(session),
            _ => None,
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session().map(|s| &s.user)
    }

    pub fn current_credential(&self) -> Option<&Credential> {
        self.session().map(|s| &s.credential)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_some()
    }

    /// True until the session question is settled: before and during
    /// bootstrap, and while a restored session is unverified.
    pub fn is_loading(&self) -> bool {
        match self {
            Self::Uninitialized | Self::Loading => true,
            Self::Authenticated { verified, .. } => !verified,
            Self::Unauthenticated => false,
        }
    }
}

type Listener = Box<dyn Fn(&SessionState)>;

struct SessionInner {
    state: RefCell<SessionState>,
    persistence: Persistence,
    listeners: RefCell<Vec<Listener>>,
    bootstrapped: Cell<bool>,
}

impl SessionInner {
    fn transition(&self, next: SessionState) {
        let snapshot = next.clone();
        *self.state.borrow_mut() = next;
        for listener in self.listeners.borrow().iter() {
            listener(&snapshot);
        }
    }

    fn logout(&self) {
        self.persistence.clear();
        self.transition(SessionState::Unauthenticated);
    }

    fn holds(&self, credential: &Credential) -> bool {
        self.state.borrow().current_credential() == Some(credential)
    }
}

/// Owner of the in-memory session. Clones share the same session.
pub struct SessionStore<T> {
    inner: Rc<SessionInner>,
    gateway: Rc<Gateway<T>>,
}

impl<T> Clone for SessionStore<T> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone(), gateway: self.gateway.clone() }
    }
}

impl<T: Transport> SessionStore<T> {
    /// Build the store and the gateway it talks through.
    ///
    /// The gateway only holds a weak reference back, so dropping every store
    /// clone releases the session.
    pub fn new(
        transport: T,
        config: &ClientConfig,
        storage: Rc<dyn KeyValueStore>,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        let persistence = Persistence::new(storage);
        let inner = Rc::new(SessionInner {
            state: RefCell::new(SessionState::Uninitialized),
            persistence: persistence.clone(),
            listeners: RefCell::new(Vec::new()),
            bootstrapped: Cell::new(false),
        });
        let weak = Rc::downgrade(&inner);
        let credential = Box::new(move || {
            let inner = weak.upgrade()?;
            let state = inner.state.borrow();
            state.current_credential().cloned()
        });
        let weak = Rc::downgrade(&inner);
        let invalidate = Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.logout();
            }
        });
        let gateway = Rc::new(Gateway::new(transport, config, persistence, navigator, credential, invalidate));
        Self { inner, gateway }
    }

    /// The gateway every resource call should go through.
    pub fn gateway(&self) -> Rc<Gateway<T>> {
        self.gateway.clone()
    }

    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    /// Call `listener` with the new state after every transition.
    ///
    /// Listeners must not subscribe further listeners.
    pub fn subscribe(&self, listener: impl Fn(&SessionState) + 'static) {
        self.inner.listeners.borrow_mut().push(Box::new(listener));
    }

    /// Restore and revalidate the persisted session. Runs once; later calls
    /// are ignored.
    ///
    /// Never fails: corrupt storage and a rejected credential both end in
    /// `Unauthenticated` with storage cleared.
    pub async fn bootstrap(&self) {
        if self.inner.bootstrapped.replace(true) {
            warn!("session: bootstrap already ran; ignoring");
            return;
        }
        self.inner.transition(SessionState::Loading);

        let Some(persisted) = self.inner.persistence.load() else {
            info!("session: no persisted session");
            self.inner.logout();
            return;
        };

        let credential = persisted.credential;
        self.inner.transition(SessionState::Authenticated {
            session: Session { user: persisted.user, credential: credential.clone() },
            verified: false,
        });

        match auth::current_user(&self.gateway).await {
            Ok(user) => {
                if !self.inner.holds(&credential) {
                    debug!("session: ended during revalidation; discarding result");
                    return;
                }
                self.inner.persistence.save(&credential, &user);
                info!("session: restored for {}", user.username);
                self.inner.transition(SessionState::Authenticated {
                    session: Session { user, credential },
                    verified: true,
                });
            }
            Err(e) => {
                warn!("session: persisted session rejected: {e}");
                self.logout();
            }
        }
    }

    /// # Errors
    ///
    /// `AuthError` with the server's message; the session is left untouched.
    pub async fn login(&self, request: &LoginRequest) -> Result<(), AuthError> {
        let response = auth::login(&self.gateway, request).await.map_err(|e| {
            debug!("session: login failed: {e}");
            AuthError::from(&e)
        })?;
        self.establish(response)
    }

    /// Same contract as [`SessionStore::login`]; a new account is signed in.
    ///
    /// # Errors
    ///
    /// `AuthError` with the server's message (e.g. duplicate account).
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), AuthError> {
        let response = auth::register(&self.gateway, request).await.map_err(|e| {
            debug!("session: register failed: {e}");
            AuthError::from(&e)
        })?;
        self.establish(response)
    }

    /// Drop the session and erase storage. Idempotent.
    pub fn logout(&self) {
        info!("session: logged out");
        self.inner.logout();
    }

    fn establish(&self, response: AuthResponse) -> Result<(), AuthError> {
        let Some(credential) = Credential::new(response.token) else {
            warn!("session: server returned an empty token");
            return Err(AuthError::generic());
        };
        self.inner.persistence.save(&credential, &response.user);
        info!("session: signed in as {}", response.user.username);
        self.inner.transition(SessionState::Authenticated {
            session: Session { user: response.user, credential },
            verified: true,
        });
        Ok(())
    }
}

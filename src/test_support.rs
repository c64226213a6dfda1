// Dobles de prueba compartidos por los tests de los módulos

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tokio::sync::Notify;

use crate::error::{RequestError, StorageError};
use crate::models::{AvatarUpload, SessionResponse, SignInRequest, UpdateProfileRequest, User};
use crate::services::AuthBackend;
use crate::state::TimerScheduler;
use crate::utils::storage::{KeyValueStorage, MemoryStorage};

struct PendingTimer {
    id: u64,
    due_ms: u64,
    callback: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct Clock {
    now_ms: u64,
    next_id: u64,
    pending: Vec<PendingTimer>,
}

/// Reloj virtual: los temporizadores solo disparan con `advance`
#[derive(Clone, Default)]
pub(crate) struct ManualScheduler {
    clock: Rc<RefCell<Clock>>,
}

pub(crate) struct ManualTimer {
    id: u64,
    clock: Weak<RefCell<Clock>>,
}

impl Drop for ManualTimer {
    fn drop(&mut self) {
        if let Some(clock) = self.clock.upgrade() {
            clock.borrow_mut().pending.retain(|t| t.id != self.id);
        }
    }
}

impl ManualScheduler {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn pending(&self) -> usize {
        self.clock.borrow().pending.len()
    }

    /// Avanza el reloj disparando en orden los temporizadores vencidos
    pub(crate) fn advance(&self, ms: u64) {
        let target = self.clock.borrow().now_ms + ms;
        loop {
            let next = {
                let mut clock = self.clock.borrow_mut();
                let due = clock
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due_ms <= target)
                    .min_by_key(|(_, t)| (t.due_ms, t.id))
                    .map(|(index, _)| index);
                due.map(|index| {
                    let timer = clock.pending.remove(index);
                    clock.now_ms = timer.due_ms;
                    timer.callback
                })
            };
            match next {
                Some(callback) => callback(),
                None => break,
            }
        }
        self.clock.borrow_mut().now_ms = target;
    }
}

impl TimerScheduler for ManualScheduler {
    type Handle = ManualTimer;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> ManualTimer {
        let mut clock = self.clock.borrow_mut();
        let id = clock.next_id;
        clock.next_id += 1;
        let due_ms = clock.now_ms + u64::from(delay_ms);
        clock.pending.push(PendingTimer { id, due_ms, callback });
        ManualTimer {
            id,
            clock: Rc::downgrade(&self.clock),
        }
    }
}

pub(crate) fn user(id: &str, name: &str, email: &str) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        avatar_url: None,
        created_at: None,
        updated_at: None,
    }
}

/// Backend con respuestas programadas y registro de llamadas
pub(crate) struct MockBackend {
    pub session_result: RefCell<Result<SessionResponse, RequestError>>,
    pub profile_result: RefCell<Result<User, RequestError>>,
    pub avatar_result: RefCell<Result<User, RequestError>>,
    pub auth_token: RefCell<Option<String>>,
    pub calls: RefCell<Vec<String>>,
    pub last_sign_in: RefCell<Option<SignInRequest>>,
    pub last_profile: RefCell<Option<UpdateProfileRequest>>,
    pub request_count: Cell<usize>,
    hold: RefCell<Option<Rc<Notify>>>,
}

impl MockBackend {
    pub(crate) fn new() -> Self {
        let unreachable = || RequestError::Network("not scripted".to_string());
        Self {
            session_result: RefCell::new(Err(unreachable())),
            profile_result: RefCell::new(Err(unreachable())),
            avatar_result: RefCell::new(Err(unreachable())),
            auth_token: RefCell::new(None),
            calls: RefCell::new(Vec::new()),
            last_sign_in: RefCell::new(None),
            last_profile: RefCell::new(None),
            request_count: Cell::new(0),
            hold: RefCell::new(None),
        }
    }

    pub(crate) fn signing_in_as(token: &str, user: User) -> Self {
        let backend = Self::new();
        *backend.session_result.borrow_mut() = Ok(SessionResponse {
            token: token.to_string(),
            user,
        });
        backend
    }

    /// `create_session` queda suspendido hasta `notify_one` sobre el valor devuelto
    pub(crate) fn hold_sessions(&self) -> Rc<Notify> {
        let release = Rc::new(Notify::new());
        *self.hold.borrow_mut() = Some(release.clone());
        release
    }

    fn record(&self, call: &str) {
        self.request_count.set(self.request_count.get() + 1);
        self.calls.borrow_mut().push(call.to_string());
    }
}

impl AuthBackend for MockBackend {
    fn set_auth_token(&self, token: Option<&str>) {
        *self.auth_token.borrow_mut() = token.map(str::to_string);
    }

    async fn create_session(&self, request: &SignInRequest) -> Result<SessionResponse, RequestError> {
        self.record("POST /sessions");
        *self.last_sign_in.borrow_mut() = Some(request.clone());
        let hold = self.hold.borrow().clone();
        if let Some(release) = hold {
            release.notified().await;
        }
        self.session_result.borrow().clone()
    }

    async fn update_profile(&self, request: &UpdateProfileRequest) -> Result<User, RequestError> {
        self.record("PUT /profile");
        *self.last_profile.borrow_mut() = Some(request.clone());
        self.profile_result.borrow().clone()
    }

    async fn update_avatar(&self, upload: &AvatarUpload) -> Result<User, RequestError> {
        self.record(&format!("PATCH /users/avatar {}", upload.file_name));
        self.avatar_result.borrow().clone()
    }
}

/// Storage en memoria cuyas escrituras a una clave pueden fallar,
/// dejando el valor anterior intacto como hace localStorage
#[derive(Clone, Default)]
pub(crate) struct FlakyStorage {
    inner: MemoryStorage,
    failing: Rc<RefCell<Option<String>>>,
}

impl FlakyStorage {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fail_writes_to(&self, key: &str) {
        *self.failing.borrow_mut() = Some(key.to_string());
    }
}

impl KeyValueStorage for FlakyStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.failing.borrow().as_deref() == Some(key) {
            return Err(StorageError::Write(key.to_string()));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}

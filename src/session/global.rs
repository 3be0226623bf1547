use crate::device::Pavlok;
use crate::transport::Transport;
use core::cell::RefCell;
use critical_section::Mutex;

/// A global slot holding at most one session, guarded by a critical section.
pub type GlobalSession<T> = Mutex<RefCell<Option<Pavlok<T>>>>;

/// Used to initialize a global static session slot for use with
/// `critical_section`.
///
/// # Returns
/// * An empty mutable ref-cell
///
/// # Example
/// ```rust,ignore
/// use pavlok::session::{GlobalSession, global_session_init};
///
/// static PAVLOK: GlobalSession<MyLink> = global_session_init::<MyLink>();
/// ```
pub const fn global_session_init<T: Transport>() -> GlobalSession<T> {
    Mutex::new(RefCell::new(None))
}

/// Places `pavlok` into the global slot, replacing any previous session.
///
/// # Returns
/// * The session that was there before, if any
///
/// # Example
/// ```rust,ignore
/// let previous = global_session_setup(&PAVLOK, Pavlok::new(link, table, config));
/// ```
pub fn global_session_setup<T: Transport>(
    global: &GlobalSession<T>,
    pavlok: Pavlok<T>,
) -> Option<Pavlok<T>> {
    critical_section::with(|cs| global.borrow(cs).replace(Some(pavlok)))
}

/// Runs `f` against the global session.
///
/// The session is moved out of the slot inside a short critical section, `f`
/// runs with interrupts enabled, and the session is put back afterwards. A
/// transport that completes responses from an interrupt can therefore block
/// in `f`. While `f` runs the slot is empty, so a concurrent caller (an
/// interrupt handler, say) gets `None` instead of interleaving its own
/// write/read pair. If the slot was filled by [`global_session_setup`] in the
/// meantime, the newer session is kept and this one is dropped.
///
/// # Returns
/// * `None` if no session has been set up, or it is in use elsewhere
///
/// # Example
/// ```rust,ignore
/// #[interrupt]
/// fn GPIOTE() {
///     let _ = with_global_session(&PAVLOK, |pavlok| pavlok.vibrate(StimulusParams::level(4)));
/// }
/// ```
pub fn with_global_session<T, R, F>(global: &GlobalSession<T>, f: F) -> Option<R>
where
    T: Transport,
    F: FnOnce(&mut Pavlok<T>) -> R,
{
    let mut pavlok = global_session_take(global)?;
    let result = f(&mut pavlok);
    critical_section::with(|cs| {
        let mut slot = global.borrow(cs).borrow_mut();
        if slot.is_none() {
            *slot = Some(pavlok);
        }
    });
    Some(result)
}

/// Removes the session from the global slot.
pub fn global_session_take<T: Transport>(global: &GlobalSession<T>) -> Option<Pavlok<T>> {
    critical_section::with(|cs| global.borrow(cs).take())
}

/// Declares a static global `PAVLOK` session slot protected by a `critical_section` mutex.
///
/// This macro creates a `static` singleton `PAVLOK` suitable for use in
/// interrupt-based environments, where both the main thread and an ISR need
/// to issue commands through the same session.
///
/// # Arguments
/// - `$transport`: The concrete transport type (must implement `Transport`)
///
/// # Example
/// ```rust,ignore
/// init_pavlok!(MyLink);
/// ```
#[macro_export]
macro_rules! init_pavlok {
    ( $transport:ty ) => {
        pub static PAVLOK: $crate::critical_section::Mutex<
            core::cell::RefCell<Option<$crate::device::Pavlok<$transport>>>,
        > = $crate::critical_section::Mutex::new(core::cell::RefCell::new(None));
    };
}

/// Initializes the global `PAVLOK` singleton with a new session.
///
/// This macro wraps construction of the `Pavlok` session and stores it inside the
/// globally declared `PAVLOK` created by `init_pavlok!`.
///
/// # Arguments
/// - `$transport`: The transport instance
/// - `$endpoints`: Optional `EndpointTable`; defaults to the value-handle scheme
/// - `$config`: Optional `Config`; defaults to `Config::default()`
///
/// # Example
/// ```rust,ignore
/// main() {
///     setup_pavlok!(link);
///     setup_pavlok!(link, EndpointTable::characteristic_handles());
///     setup_pavlok!(link, EndpointTable::characteristic_handles(), config);
/// }
/// ```
///
/// # Notes
/// - Must be called inside a critical section-aware context (safe in `main()`).
/// - Requires `init_pavlok!` to have been used earlier.
/// - The session is stored unstarted; call `start()` through `with_pavlok!`.
#[macro_export]
macro_rules! setup_pavlok {
    ( $transport:expr ) => {
        $crate::setup_pavlok!(
            $transport,
            $crate::endpoint::EndpointTable::value_handles(),
            $crate::config::Config::default()
        )
    };
    ( $transport:expr, $endpoints:expr ) => {
        $crate::setup_pavlok!($transport, $endpoints, $crate::config::Config::default())
    };
    ( $transport:expr, $endpoints:expr, $config:expr ) => {
        $crate::session::global_session_setup(
            &PAVLOK,
            $crate::device::Pavlok::new($transport, $endpoints, $config),
        )
    };
}

/// Runs a closure against the global `PAVLOK` session; see [`with_global_session`](crate::session::with_global_session).
///
/// Evaluates to `None` when no session has been set up or it is in use elsewhere.
///
/// # Example
/// ```rust,ignore
/// #[interrupt]
/// fn GPIOTE() {
///     let _ = with_pavlok!(|pavlok| pavlok.shock(3, 1));
/// }
/// ```
#[macro_export]
macro_rules! with_pavlok {
    ( |$pavlok:ident| $body:expr ) => {
        $crate::session::with_global_session(&PAVLOK, |$pavlok| $body)
    };
}

#[cfg(test)]
mod tests {
    use crate::endpoint::EndpointTable;
    use crate::mock::{MockTransport, Transaction};
    use crate::params::StimulusParams;
    use crate::session::global_session_take;

    crate::init_pavlok!(MockTransport);

    #[test]
    fn test_macros_share_one_session() {
        let transport = MockTransport::new(&[
            Transaction::Open,
            Transaction::write(15, "810c1e1818"),
            Transaction::Close,
        ]);
        assert!(crate::setup_pavlok!(transport, EndpointTable::characteristic_handles()).is_none());

        let started = crate::with_pavlok!(|pavlok| pavlok.start());
        assert_eq!(started, Some(Ok(())));
        let sent = crate::with_pavlok!(|pavlok| pavlok.vibrate(StimulusParams::level(3)));
        assert_eq!(sent, Some(Ok(())));
        let stopped = crate::with_pavlok!(|pavlok| pavlok.stop());
        assert_eq!(stopped, Some(Ok(())));

        let mut transport = global_session_take(&PAVLOK).map(|p| p.release()).unwrap();
        transport.done();
    }
}

use std::time::{Duration, Instant};

/// Logs one pipeline stage and returns the elapsed time so far.
///
/// The stage time is the difference to `_detect_elapsed`, the value returned
/// by the previous call.
pub(crate) fn trace(is_test: bool, l_type: &str, l_step: &str, detect: Instant, _detect_elapsed: Duration) -> Duration {
    let elapsed = detect.elapsed();
    if is_test {
        println!("{} | Total={}ms | {}={:.2?}", l_type, elapsed.as_millis(), l_step, elapsed - _detect_elapsed);
    }
    else {
        log::trace!("{} | Total={:.2?} | {}={:.2?}", l_type, elapsed, l_step, elapsed - _detect_elapsed);
    }
    elapsed
}

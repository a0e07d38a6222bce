use std::cell::Cell;

use sprig_core::remember;

thread_local! {
    static NEXT_ID: Cell<u64> = const { Cell::new(0) };
}

/// Id for the calling widget instance, stable across frames.
///
/// `deterministic` wins when given; a generated id is still reserved so the
/// instance keeps its remembered slots in the same order either way.
pub fn use_id(deterministic: Option<&str>) -> String {
    let generated = remember(|| {
        NEXT_ID.with(|n| {
            let id = n.get();
            n.set(id + 1);
            id
        })
    });
    match deterministic {
        Some(id) => id.to_string(),
        None => format!("sprig-{generated}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprig_core::compose;

    #[test]
    fn test_id_is_stable_per_instance() {
        let frame = || (use_id(None), use_id(None), use_id(Some("fixed")));
        let (a, b, c) = compose(frame);
        assert_ne!(a, b);
        assert_eq!(c, "fixed");
        assert_eq!(compose(frame), (a, b, c));
    }
}

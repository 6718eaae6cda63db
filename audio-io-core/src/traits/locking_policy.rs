use std::cell::{RefCell, RefMut};
use std::ops::DerefMut;

use parking_lot::{Mutex, MutexGuard};

/// How a `DeviceCore` serializes access to its backend.
///
/// The policy decides the cell the backend lives in and what "acquire"
/// means. The token returned by [`acquire`](LockingPolicy::acquire) is the
/// only way to reach the protected value and releases when dropped.
pub trait LockingPolicy {
    type Cell<T>;
    type Token<'a, T>: DerefMut<Target = T>
    where
        T: 'a;

    fn new_cell<T>(value: T) -> Self::Cell<T>;

    fn acquire<'a, T>(cell: &'a Self::Cell<T>) -> Self::Token<'a, T>
    where
        T: 'a;
}

/// No exclusion. Acquire is free.
///
/// Devices using this policy are `!Sync`, so they cannot be shared between
/// threads at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLock;

impl LockingPolicy for NullLock {
    type Cell<T> = RefCell<T>;
    type Token<'a, T>
        = RefMut<'a, T>
    where
        T: 'a;

    fn new_cell<T>(value: T) -> RefCell<T> {
        RefCell::new(value)
    }

    fn acquire<'a, T>(cell: &'a RefCell<T>) -> RefMut<'a, T>
    where
        T: 'a,
    {
        cell.borrow_mut()
    }
}

/// Mutual exclusion: acquire blocks until the device mutex is free.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExclusiveLock;

impl LockingPolicy for ExclusiveLock {
    type Cell<T> = Mutex<T>;
    type Token<'a, T>
        = MutexGuard<'a, T>
    where
        T: 'a;

    fn new_cell<T>(value: T) -> Mutex<T> {
        Mutex::new(value)
    }

    fn acquire<'a, T>(cell: &'a Mutex<T>) -> MutexGuard<'a, T>
    where
        T: 'a,
    {
        cell.lock()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    fn bump<L: LockingPolicy>(cell: &L::Cell<u32>) {
        let mut token = L::acquire::<u32>(cell);
        *token += 1;
    }

    #[test]
    fn null_lock_token_releases_on_drop() {
        let cell = NullLock::new_cell(0u32);
        bump::<NullLock>(&cell);
        bump::<NullLock>(&cell);
        assert_eq!(*NullLock::acquire(&cell), 2);
    }

    #[test]
    fn exclusive_lock_serializes_threads() {
        let cell = Arc::new(ExclusiveLock::new_cell(0u32));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cell = Arc::clone(&cell);
                thread::spawn(move || {
                    for _ in 0..1000 {
                        bump::<ExclusiveLock>(&cell);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(*ExclusiveLock::acquire(&*cell), 4000);
    }

    #[test]
    fn exclusive_token_is_released_after_scope() {
        let cell = ExclusiveLock::new_cell(());
        {
            let _token = ExclusiveLock::acquire(&cell);
            assert!(cell.try_lock().is_none());
        }
        assert!(cell.try_lock().is_some());
    }
}

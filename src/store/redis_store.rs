//! Redis-backed list store.

use crate::store::{ListStore, StoreResult};
use parking_lot::Mutex;

/// A [`ListStore`] over a synchronous Redis connection.
///
/// The connection is opened and eventually closed by the caller; this type
/// only serialises access to it. [`into_inner`](Self::into_inner) hands it
/// back.
pub struct RedisListStore {
    conn: Mutex<redis::Connection>,
}

impl RedisListStore {
    /// Wrap an open connection.
    pub fn new(conn: redis::Connection) -> Self {
        Self { conn: Mutex::new(conn) }
    }

    /// Return the wrapped connection.
    pub fn into_inner(self) -> redis::Connection {
        self.conn.into_inner()
    }
}

impl ListStore for RedisListStore {
    fn len(&self, key: &str) -> StoreResult<u64> {
        let len: u64 = redis::cmd("LLEN").arg(key).query(&mut *self.conn.lock())?;
        Ok(len)
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        redis::cmd("DEL").arg(key).query::<()>(&mut *self.conn.lock())?;
        Ok(())
    }

    fn push_unset(&self, key: &str, count: u64) -> StoreResult<()> {
        let mut cmd = redis::cmd("RPUSH");
        cmd.arg(key);
        for _ in 0..count {
            cmd.arg("");
        }
        cmd.query::<()>(&mut *self.conn.lock())?;
        Ok(())
    }

    fn set(&self, key: &str, index: u64, value: &[u8]) -> StoreResult<()> {
        redis::cmd("LSET").arg(key).arg(index).arg(value).query::<()>(&mut *self.conn.lock())?;
        Ok(())
    }

    fn get(&self, key: &str, index: u64) -> StoreResult<Option<Vec<u8>>> {
        let value: Option<Vec<u8>> =
            redis::cmd("LINDEX").arg(key).arg(index).query(&mut *self.conn.lock())?;
        Ok(value.filter(|v| !v.is_empty()))
    }
}

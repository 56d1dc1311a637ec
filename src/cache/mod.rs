pub mod cache_manager;

use crate::models::SessionUser;
use cache_manager::CacheManager;

lazy_static::lazy_static! {
    pub static ref SESSION_USER_CACHE: CacheManager<i64, SessionUser> = CacheManager::new(500);
}

//! 对象缓存层
//!
//! 通过插件注册表支持多种缓存后端（Moka 内存缓存 / Redis）。
//! 仅用于会话用户等热点对象，业务聚合结果一律实时计算，不走缓存。

mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 声明并注册一个缓存插件
///
/// 在插件模块内调用，进程启动时通过 ctor 自动注册到全局注册表。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $plugin:ident) => {
        #[ctor::ctor]
        fn __register_object_cache_plugin() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                std::sync::Arc::new(|| {
                    Box::pin(async {
                        let plugin = $plugin::new()
                            .map_err($crate::errors::CollabRateError::cache_connection)?;
                        Ok(Box::new(plugin) as Box<dyn $crate::cache::ObjectCache>)
                    }) as $crate::cache::register::BoxedObjectCacheFuture
                }),
            );
        }
    };
}

use crate::cache::object_cache::register_builtin_object_caches;
use crate::cache::{ObjectCache, register::get_object_cache_plugin};
use crate::config::AppConfig;
use crate::models::businesses::{BusinessType, CreateBusinessRequest};
use crate::models::users::{CreateUserRequest, UserRole};
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::random_code::generate_initial_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

/// 创建缓存实例
async fn create_cache() -> Result<Arc<dyn ObjectCache>, Box<dyn std::error::Error>> {
    let config = AppConfig::get();
    let cache_type = &config.cache.cache_type;

    warn!("Attempting to create {} cache backend", cache_type);

    // 根据配置选择缓存后端
    if let Some(constructor) = get_object_cache_plugin(cache_type) {
        match constructor().await {
            Ok(cache) => {
                warn!("Successfully created {} cache backend", cache_type);
                return Ok(Arc::from(cache));
            }
            Err(e) => {
                warn!("Failed to create {} cache: {}", cache_type, e);

                // 如果配置的缓存失败，尝试回退策略
                if cache_type == "redis" {
                    warn!("Falling back to memory cache");
                    if let Some(fallback_constructor) = get_object_cache_plugin("moka") {
                        match fallback_constructor().await {
                            Ok(cache) => {
                                warn!(
                                    "Successfully created fallback Moka (in-memory) cache backend"
                                );
                                return Ok(Arc::from(cache));
                            }
                            Err(fallback_e) => {
                                warn!("Failed to create fallback Moka cache: {}", fallback_e);
                            }
                        }
                    }
                }
            }
        }
    } else {
        warn!("Cache backend '{}' not found in registry", cache_type);

        // 如果找不到配置的缓存类型，尝试默认的内存缓存
        if cache_type != "moka" {
            warn!("Falling back to default memory cache");
            if let Some(fallback_constructor) = get_object_cache_plugin("moka") {
                match fallback_constructor().await {
                    Ok(cache) => {
                        warn!("Successfully created fallback Moka (in-memory) cache backend");
                        return Ok(Arc::from(cache));
                    }
                    Err(fallback_e) => {
                        warn!("Failed to create fallback Moka cache: {}", fallback_e);
                    }
                }
            }
        }
    }

    Err(format!("No cache backend available (tried: {cache_type})").into())
}

/// 初始化默认商户与所有者账号
/// 如果数据库中没有任何用户，则创建一个商户和它的 owner 账号
async fn seed_owner(storage: &Arc<dyn Storage>) {
    // 检查是否已有用户
    match storage.count_users().await {
        Ok(count) if count > 0 => {
            debug!(
                "Database already has {} user(s), skipping owner seed",
                count
            );
            return;
        }
        Ok(_) => {
            info!("No users found in database, creating default business and owner...");
        }
        Err(e) => {
            warn!("Failed to count users: {}, skipping owner seed", e);
            return;
        }
    }

    let config = AppConfig::get();
    let business_type = match config.business.seed_business_type.parse::<BusinessType>() {
        Ok(business_type) => business_type,
        Err(e) => {
            warn!("{}, skipping owner seed", e);
            return;
        }
    };

    // 获取密码：优先从环境变量，否则生成满足密码策略的随机密码
    let password = std::env::var("OWNER_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_initial_password();
        warn!("==========================================================");
        warn!("  OWNER PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated owner password: {}", pwd);
        warn!("  Please save this password or set OWNER_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    // 哈希密码
    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash owner password: {}, skipping owner seed", e);
            return;
        }
    };

    let business = CreateBusinessRequest {
        name: config.business.seed_business_name.clone(),
        business_type,
        currency: config.business.default_currency.clone(),
    };
    let owner = CreateUserRequest {
        username: "owner".to_string(),
        email: "owner@localhost".to_string(),
        password: password_hash,
        role: UserRole::Owner,
        display_name: Some("Owner".to_string()),
    };

    match storage.create_business_with_owner(business, owner).await {
        Ok((business, user)) => {
            info!(
                "Default business {} ({}) and owner {} created",
                business.id, business.name, user.username
            );
        }
        Err(e) => {
            warn!("Failed to create default owner: {}", e);
        }
    }
}

/// 准备服务器启动的上下文
/// 包括存储、缓存和路由配置等
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    register_builtin_object_caches();
    if cfg!(debug_assertions) {
        crate::cache::register::debug_object_cache_registry();
        debug!("Debug mode: Cache registry is enabled");
    }

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    // 初始化默认商户和所有者账号（如果需要）
    seed_owner(&storage).await;

    // 创建缓存实例
    let cache = create_cache().await.expect("Failed to create cache");
    warn!("Cache backend initialized");

    StartupContext { storage, cache }
}

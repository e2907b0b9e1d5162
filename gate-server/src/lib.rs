//! GigMatch Gate Server - 演出现场入场核验节点
//!
//! # 架构概述
//!
//! 本模块是 Gate Server 的主入口，提供以下核心功能：
//!
//! - **验证码编解码** (`codec`): 购票记录 ↔ 可扫描验证码
//! - **数据库** (`db`): 嵌入式 SQLite 票据账本
//! - **扫描服务** (`scan`): 只读校验 + 原子入场
//! - **实时广播** (`live`): 入场事件按演出推送
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! gate-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── codec.rs       # 验证码编解码
//! ├── scan/          # verify / check-in 服务
//! ├── live.rs        # 入场实时广播
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层
//! └── utils/         # 错误、日志
//! ```
//!
//! # 正确性核心
//!
//! 同一张票的并发入场在账本层由一条条件插入语句裁决
//! (`UNIQUE(purchase_id)` + 状态守卫)，恰好一个调用者收到 `admitted`，
//! 其余收到 `already_used` —— 应用层不持有任何锁。

pub mod api;
pub mod codec;
pub mod core;
pub mod db;
pub mod live;
pub mod scan;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use live::LiveFeed;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
   ______ _         __  ___        __         __
  / ____/(_)____ _ /  |/  /____ _ / /_ _____ / /_
 / / __ / // __ `// /|_/ // __ `// __// ___// __ \
/ /_/ // // /_/ // /  / // /_/ // /_ / /__ / / / /
\____//_/ \__, //_/  /_/ \__,_/ \__/ \___//_/ /_/
         /____/        G A T E   S E R V E R
    "#
    );
}

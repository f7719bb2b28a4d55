//! ARX 宿主交互
//!
//! 图形数据库之外、与宿主进程打交道的部分：
//! - 命令投递: 向宿主命令队列异步投递命令字符串
//! - 按需加载注册: 宿主启动时自动装载应用的注册信息
//! - 输入校验: 命令行输入的数字与点坐标解析

pub mod command;
pub mod register;
pub mod validate;

pub use command::{CommandSink, QueuedCommandSink};
pub use register::{RegisterError, RegistrationStore};

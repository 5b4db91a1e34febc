//! 数据库仓储层
//!
//! 每个聚合一个仓储。跨表写入（客户注册、流水追加、规则删除）
//! 统一走事务版本的 `*_in_tx` 方法。

mod appointment_repo;
mod balance_repo;
mod catalog_repo;
mod content_repo;
mod customer_repo;
mod ledger_repo;
mod policy_repo;
mod staff_repo;
pub mod traits;

pub use appointment_repo::AppointmentRepository;
pub use balance_repo::BalanceRepository;
pub use catalog_repo::CatalogRepository;
pub use content_repo::ContentRepository;
pub use customer_repo::CustomerRepository;
pub use ledger_repo::LedgerRepository;
pub use policy_repo::ConversionPolicyRepository;
pub use staff_repo::StaffRepository;
pub use traits::ConversionPolicyRepositoryTrait;

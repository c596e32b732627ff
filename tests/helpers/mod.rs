// ==========================================
// 集成测试共用辅助模块
// ==========================================

pub mod test_data_builder;

pub use test_data_builder::SalesRecordBuilder;

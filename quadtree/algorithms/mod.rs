// 四叉树算法模块
//
// - insert: 插入、定位与细分
// - search: 矩形范围查询
// - debug: 调试打印与JSON可视化导出

pub mod debug;
pub mod insert;
pub mod search;

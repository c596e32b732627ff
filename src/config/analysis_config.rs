// ==========================================
// 出荷明细台账 - 分析配置
// ==========================================
// 职责: 日期窗口、金额容差、数量分桶
// 红线: validate() 在任何导入/汇总之前执行
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::quantity_bins::{default_quantity_bins, validate_bins, QuantityBin};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 单价×个数 与金额的默认允许偏差 (绝对值, 货币单位)
pub const DEFAULT_TOLERANCE: f64 = 0.01;

// ==========================================
// DateWindow - 日期窗口 (两端包含)
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateWindow {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// 无限制窗口
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if start > end {
                return Err(ConfigError::InvertedDateWindow { start, end });
            }
        }
        Ok(())
    }

    /// 判断日期是否落在窗口内
    ///
    /// 日期为空的记录只有在窗口无限制时保留
    pub fn contains(&self, date: Option<NaiveDate>) -> bool {
        if self.is_unbounded() {
            return true;
        }
        match date {
            Some(d) => {
                self.start.map_or(true, |s| d >= s) && self.end.map_or(true, |e| d <= e)
            }
            None => false,
        }
    }
}

// ==========================================
// AnalysisConfig - 分析配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub tolerance: f64,
    pub date_window: DateWindow,
    pub quantity_bins: Vec<QuantityBin>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            date_window: DateWindow::unbounded(),
            quantity_bins: default_quantity_bins(),
        }
    }
}

impl AnalysisConfig {
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_date_window(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.date_window = DateWindow::new(start, end);
        self
    }

    pub fn with_quantity_bins(mut self, bins: Vec<QuantityBin>) -> Self {
        self.quantity_bins = bins;
        self
    }

    /// 校验全部配置项
    pub fn validate(&self) -> ConfigResult<()> {
        validate_tolerance(self.tolerance)?;
        self.date_window.validate()?;
        validate_bins(&self.quantity_bins)?;
        Ok(())
    }
}

pub fn validate_tolerance(tolerance: f64) -> ConfigResult<()> {
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(ConfigError::InvalidTolerance(tolerance.to_string()));
    }
    Ok(())
}

/// 解析命令行日期 (YYYY-MM-DD, 兼容 YYYY/MM/DD 与 YYYYMMDD)
pub fn parse_date_arg(field: &str, value: &str) -> ConfigResult<NaiveDate> {
    let v = value.trim();
    NaiveDate::parse_from_str(v, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(v, "%Y/%m/%d"))
        .or_else(|_| NaiveDate::parse_from_str(v, "%Y%m%d"))
        .map_err(|_| ConfigError::InvalidDate {
            field: field.to_string(),
            value: value.to_string(),
        })
}

/// 解析容差字符串
pub fn parse_tolerance_arg(value: &str) -> ConfigResult<f64> {
    let tol: f64 = value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidTolerance(value.to_string()))?;
    validate_tolerance(tol)?;
    Ok(tol)
}

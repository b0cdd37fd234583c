//! Chinese calendar
//!
//! Note: 為方便處理諸多術語，本模塊文檔用中文。
//!
//! 本程序採用預製的年份編碼表推算 1900 至 2100 年的農曆，見 [`table`]。

use std::fmt as std_fmt;

use crate::date::Date;

pub mod fmt;
pub mod period;
pub mod table;

pub use period::{PeriodError, add_period, days_until, lunar_to_solar};

/// 農曆年，自正月初一至次年正月初一前日。
///
/// 支持的年份見 [`table::YEARS`]。
///
/// # 用例
///
/// ```
/// use abonilo::Date;
/// use abonilo::chinese::{LunarYear, Month::*};
///
/// let date = Date::from_gregorian(2000, 1, 1).unwrap();
/// let year = LunarYear::from_date(date).unwrap();
///
/// assert_eq!(1999, year.year);
/// assert_eq!(Ok((1999, Common(11), 25)), year.ymd_for(date).map(|d| d.ymd()));
/// ```
#[derive(Debug, Clone)]
pub struct LunarYear {
    /// 年序號，即正月所在公元年
    pub year: i32,
    /// 全部月首，包括次年正月以標記本年最末日
    pub months: Vec<NewMoon>,
}
/// 月首信息
#[derive(Debug, Copy, Clone)]
pub struct NewMoon {
    /// 月名
    pub month: Month,
    /// 月首所在日期
    pub date: Date,
}
/// 月名，`Common` 為平月，`Leap` 為閏月。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Month {
    Common(u32),
    Leap(u32),
}
impl Month {
    /// 依月序號與是否閏月構造月名。
    pub fn new(num: u32, is_leap: bool) -> Self {
        if is_leap {
            Month::Leap(num)
        } else {
            Month::Common(num)
        }
    }
    /// 取得月序號，無論平閏。
    pub fn num(&self) -> u32 {
        use Month::*;
        *match self {
            Common(v) | Leap(v) => v,
        }
    }
    /// 閏月為 `true`，平月為 `false`
    pub fn is_leap(&self) -> bool {
        matches!(self, Self::Leap(_))
    }
    /// 取得月名的文本形式，十一、十二月稱「冬月」「腊月」。
    pub fn name(&self) -> String {
        fmt::month(*self)
    }
}

impl LunarYear {
    /// 取得農曆 `year` 年。
    ///
    /// 若編碼表無該年資料則返回 `None`。
    ///
    /// # 用例
    ///
    /// ```
    /// use abonilo::chinese::{LunarYear, Month::*};
    ///
    /// let year = LunarYear::new(2023).unwrap();
    /// assert_eq!(14, year.months.len()); // 含閏二月及次年正月
    /// assert_eq!(Leap(2), year.months[2].month);
    /// assert_eq!("2023-03-22", year.months[2].date.iso_gregorian());
    /// ```
    pub fn new(year: i32) -> Option<Self> {
        use Month::*;

        let leap = table::leap_month(year)?;
        let mut date = Date::from_jdn(table::EPOCH_JDN + table::new_year_offset(year)?);
        let mut months = Vec::with_capacity(14);
        for num in 1..=12 {
            months.push(NewMoon {
                month: Common(num),
                date,
            });
            date = date + table::month_days(year, num)? as i32;
            if num == leap {
                months.push(NewMoon {
                    month: Leap(num),
                    date,
                });
                date = date + table::leap_days(year)? as i32;
            }
        }
        months.push(NewMoon {
            month: Common(1),
            date,
        });

        Some(LunarYear { year, months })
    }
    /// 依特定日期取得其所在農曆年。
    ///
    /// 日期早於 1900 年正月初一或晚於 2100 年末日則返回 `None`。
    ///
    /// # 用例
    ///
    /// ```
    /// use abonilo::Date;
    /// use abonilo::chinese::LunarYear;
    ///
    /// let date = Date::from_gregorian(2023, 1, 21).unwrap();
    /// assert_eq!(2022, LunarYear::from_date(date).unwrap().year);
    /// ```
    pub fn from_date(date: Date) -> Option<Self> {
        let offset = date.jdn().checked_sub(table::EPOCH_JDN)?;
        let (year, _) = table::year_for_offset(offset)?;
        Self::new(year)
    }

    /// 取得給定日期在該年的農曆日期。
    ///
    /// 若所給日期不在該年，則回報 `Err` 並指出該日期在該年之前還是之後。
    pub fn ymd_for(&self, date: Date) -> Result<LunarDate, OtherYear> {
        let begin = self.months[0].date;
        let end = self.end();

        if date < begin {
            return Err(OtherYear::Before);
        } else if date >= end {
            return Err(OtherYear::After);
        }

        let idx = self.months.partition_point(|m| m.date <= date) - 1;
        let m = &self.months[idx];
        Ok(LunarDate {
            year: self.year,
            month: m.month,
            day: (date - m.date) as u32 + 1,
        })
    }

    /// 取得該年某月的月首，月不存在（如無閏月之年的閏月）則返回 `None`。
    pub fn new_moon(&self, month: Month) -> Option<&NewMoon> {
        let end = self.months.len() - 1;
        self.months[..end].iter().find(|m| m.month == month)
    }

    /// 取得該年某月的日數，月不存在則返回 `None`。
    ///
    /// # 用例
    ///
    /// ```
    /// use abonilo::chinese::{LunarYear, Month::*};
    ///
    /// let year = LunarYear::new(2017).unwrap();
    /// assert_eq!(Some(30), year.month_len(Leap(6)));
    /// assert_eq!(None, year.month_len(Leap(7)));
    /// ```
    pub fn month_len(&self, month: Month) -> Option<u32> {
        let end = self.months.len() - 1;
        let idx = self.months[..end].iter().position(|m| m.month == month)?;
        Some((self.months[idx + 1].date - self.months[idx].date) as u32)
    }

    /// 次年正月初一，即本年最末日之次日。
    pub fn end(&self) -> Date {
        self.months[self.months.len() - 1].date
    }
}

/// 表示給定日期不在該年，並指出其在前還是在後。
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum OtherYear {
    Before,
    After,
}

/// 農曆日期。
///
/// 字段可自由構造，未必為有效日期；有效性以 [`LunarDate::is_valid`] 檢查。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct LunarDate {
    pub year: i32,
    pub month: Month,
    pub day: u32,
}

impl LunarDate {
    pub fn new(year: i32, month: Month, day: u32) -> Self {
        Self { year, month, day }
    }

    /// 將公曆日期轉為農曆日期。
    ///
    /// 日期早於 1900 年正月初一（1900 年 1 月 31 日）或公曆年份不在
    /// [`table::YEARS`] 內則返回 `None`。
    pub fn from_date(date: Date) -> Option<Self> {
        if !table::YEARS.contains(&date.gregorian().0) {
            return None;
        }
        LunarYear::from_date(date)?.ymd_for(date).ok()
    }

    /// 以 `(年, 月, 日)` 格式返回。
    pub fn ymd(&self) -> (i32, Month, u32) {
        (self.year, self.month, self.day)
    }

    /// 是否閏月
    pub fn is_leap(&self) -> bool {
        self.month.is_leap()
    }

    /// 檢查該日期是否存在：閏月須為該年閏月，日不超過該月日數。
    ///
    /// # 用例
    ///
    /// ```
    /// use abonilo::chinese::{LunarDate, Month::*};
    ///
    /// assert!(LunarDate::new(2023, Leap(2), 29).is_valid());
    /// assert!(!LunarDate::new(2023, Leap(2), 30).is_valid());
    /// assert!(!LunarDate::new(2024, Leap(2), 1).is_valid());
    /// ```
    pub fn is_valid(&self) -> bool {
        self.month_len().is_some_and(|len| (1..=len).contains(&self.day))
    }

    /// 該日所在月的日數，月不存在則返回 `None`。
    pub fn month_len(&self) -> Option<u32> {
        let num = self.month.num();
        match self.month {
            Month::Leap(_) if table::leap_month(self.year)? != num => None,
            Month::Leap(_) => table::leap_days(self.year),
            Month::Common(_) => table::month_days(self.year, num),
        }
    }

    /// 年名，如「癸卯年」。
    pub fn year_name(&self) -> String {
        fmt::year(self.year)
    }
    /// 月名，如「闰二月」。
    pub fn month_name(&self) -> String {
        fmt::month(self.month)
    }
    /// 日名，如「初一」。
    pub fn day_name(&self) -> String {
        fmt::day(self.day)
    }
}

impl std_fmt::Display for LunarDate {
    /// 格式化為「癸卯年闰二月初一」形式。
    fn fmt(&self, f: &mut std_fmt::Formatter<'_>) -> std_fmt::Result {
        write!(f, "{}{}{}", self.year_name(), self.month_name(), self.day_name())
    }
}

/// 將公曆年月日轉為農曆日期。
///
/// 公曆年份不在 1900 至 2100 間、日期不存在或早於 1900 年 1 月 31 日，則返回 `None`。
///
/// # 用例
///
/// ```
/// use abonilo::chinese::{solar_to_lunar, Month::*};
///
/// let lunar = solar_to_lunar(2023, 1, 22).unwrap();
/// assert_eq!((2023, Common(1), 1), lunar.ymd());
/// assert_eq!("癸卯年正月初一", lunar.to_string());
///
/// assert_eq!(None, solar_to_lunar(1899, 12, 31));
/// assert_eq!(None, solar_to_lunar(2101, 1, 1));
/// ```
pub fn solar_to_lunar(year: i32, month: i32, day: i32) -> Option<LunarDate> {
    if !table::YEARS.contains(&year) {
        return None;
    }
    LunarDate::from_date(Date::from_gregorian(year, month, day)?)
}

//! 格式化日期相關功能
//!
//! 輸出沿用通行的簡體寫法（「闰」「腊」），與提醒文本一致。

/// 漢數字，第 `1..=9` 項分別為「一」到「九」。為便於格式化日期，第 0 項為「十」。
pub const NUM_CHINESE: &[&str] = &["十", "一", "二", "三", "四", "五", "六", "七", "八", "九"];

/// 十天干，自「甲」起
pub const STEMS: &[&str] = &["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];
/// 十二地支，自「子」起
pub const BRANCHES: &[&str] = &[
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

/// 取得農曆年的干支名（含「年」字）。
///
/// # 用例
///
/// ```
/// use abonilo::chinese;
///
/// assert_eq!("甲子年", chinese::fmt::year(1984));
/// assert_eq!("癸卯年", chinese::fmt::year(2023));
/// ```
pub fn year(year: i32) -> String {
    let n = year - 4;
    STEMS[n.rem_euclid(10) as usize].to_owned() + BRANCHES[n.rem_euclid(12) as usize] + "年"
}

/// 取得月名（含「月」字）。十一、十二月稱「冬月」「腊月」。
///
/// 月序號不在 `1..=12` 間則以阿拉伯數字表示。
///
/// # 用例
///
/// ```
/// use abonilo::chinese::{self, Month::*};
///
/// assert_eq!("冬月", chinese::fmt::month(Common(11)));
/// assert_eq!("闰正月", chinese::fmt::month(Leap(1)));
/// ```
pub fn month(m: super::Month) -> String {
    let mut rt = String::new();
    if m.is_leap() {
        rt += "闰";
    }
    let num = m.num();
    match num {
        1 => rt += "正",
        2..=10 => rt += NUM_CHINESE[(num % 10) as usize],
        11 => rt += "冬",
        12 => rt += "腊",
        _ => rt += &num.to_string(),
    }
    rt += "月";
    rt
}

/// 取得日名，前十日為「初一」到「初十」，第 21 至 29 日為「廿一」到「廿九」。
///
/// 日序號不在 `1..=30` 間則以阿拉伯數字表示。
///
/// # 用例
///
/// ```
/// use abonilo::chinese;
///
/// assert_eq!("初十", chinese::fmt::day(10));
/// assert_eq!("廿五", chinese::fmt::day(25));
/// assert_eq!("三十", chinese::fmt::day(30));
/// ```
pub fn day(d: u32) -> String {
    let prefix = match d {
        1..=10 => "初",
        11..=19 => "十",
        20 => "二",
        21..=29 => "廿",
        30 => "三",
        _ => return format!("{d}日"),
    };
    prefix.to_owned() + NUM_CHINESE[(d % 10) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chinese::Month::*;

    #[test]
    fn test_year() {
        for (std, y) in [("甲子年", 1984), ("庚子年", 1900), ("庚辰年", 2000), ("庚申年", 2100)] {
            assert_eq!(std, year(y));
        }
    }

    #[test]
    fn test_month() {
        for (std, m) in [
            ("正月", Common(1)),
            ("二月", Common(2)),
            ("十月", Common(10)),
            ("腊月", Common(12)),
            ("闰六月", Leap(6)),
            ("13月", Common(13)),
        ] {
            assert_eq!(std, month(m));
        }
    }

    #[test]
    fn test_day() {
        for (std, d) in [
            ("初一", 1),
            ("初十", 10),
            ("十一", 11),
            ("二十", 20),
            ("廿一", 21),
            ("三十", 30),
            ("31日", 31),
            ("0日", 0),
        ] {
            assert_eq!(std, day(d));
        }
    }
}

//! 数学符号规范化
//!
//! 把 Unicode 数学符号和简写记法（上标、下标、简单分数）改写成 LaTeX 风格的标记。
//! 改写是无条件的：不先判断文本"像不像公式"。

use phf::phf_map;
use regex::Regex;
use std::sync::LazyLock;

/// 符号 → LaTeX 宏
static MATH_SYMBOLS: phf::Map<char, &'static str> = phf_map! {
    '×' => "\\times",
    '÷' => "\\div",
    '±' => "\\pm",
    '≠' => "\\neq",
    '≤' => "\\leq",
    '≥' => "\\geq",
    '∞' => "\\infty",
    '√' => "\\sqrt",
    '∑' => "\\sum",
    '∫' => "\\int",
    'π' => "\\pi",
    'α' => "\\alpha",
    'β' => "\\beta",
    'γ' => "\\gamma",
    'θ' => "\\theta",
    'λ' => "\\lambda",
    'μ' => "\\mu",
    'σ' => "\\sigma",
    'Δ' => "\\Delta",
    'Ω' => "\\Omega",
};

static RE_SUPERSCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([\p{L}\p{N}]+)\^([\p{L}\p{N}]+)").expect("valid superscript regex")
});
static RE_SUBSCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([\p{L}\p{N}]+)_([\p{L}\p{N}]+)").expect("valid subscript regex")
});
static RE_FRACTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([\p{L}\p{N}]+)/([\p{L}\p{N}]+)").expect("valid fraction regex")
});

/// 规范化数学记法
///
/// 顺序：符号替换 → 上标 → 下标 → 分数。对任何输入都成立，空串原样返回；
/// 对已经规范化过的文本再次调用不会产生变化。
pub fn normalize_math(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let replaced = replace_symbols(text);
    let replaced = RE_SUPERSCRIPT.replace_all(&replaced, "${1}^{${2}}");
    let replaced = RE_SUBSCRIPT.replace_all(&replaced, "${1}_{${2}}");
    let replaced = RE_FRACTION.replace_all(&replaced, r"\frac{${1}}{${2}}");
    replaced.into_owned()
}

/// 文本中是否含有可改写的数学记法（只用于日志）
pub fn contains_math(text: &str) -> bool {
    text.chars().any(|c| MATH_SYMBOLS.contains_key(&c))
        || RE_SUPERSCRIPT.is_match(text)
        || RE_SUBSCRIPT.is_match(text)
        || RE_FRACTION.is_match(text)
}

// 宏后面紧跟字母或数字时补一个空格，否则 `πr` 会变成 `\pir`
fn replace_symbols(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match MATH_SYMBOLS.get(&c) {
            Some(latex) => {
                out.push_str(latex);
                if chars.peek().is_some_and(|next| next.is_alphanumeric()) {
                    out.push(' ');
                }
            }
            None => out.push(c),
        }
    }

    out
}

use clap::ValueEnum;
use ssr_report::HeaderStyle;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum HeaderFlag {
    Banner,
    None,
}

impl HeaderFlag {
    pub(crate) const fn as_domain(self) -> HeaderStyle {
        match self {
            HeaderFlag::Banner => HeaderStyle::Banner,
            HeaderFlag::None => HeaderStyle::None,
        }
    }
}

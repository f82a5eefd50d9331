//! Conversions and forwarding impls for the URL writer types.

use std::fmt;
use std::ops::Deref;

use crate::req::PageRef;
use crate::url::{BufferedName, TriStr, UrlParamWriter, WriteUrlValue};

impl Deref for TriStr<'_> {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        match self {
            Self::Owned(s) => s,
            Self::Static(s) => s,
            Self::Shared(s) => s,
        }
    }
}

impl fmt::Display for TriStr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).fmt(f)
    }
}

impl From<String> for TriStr<'_> {
    fn from(s: String) -> Self {
        Self::Owned(s)
    }
}

impl<'w, T: UrlParamWriter> UrlParamWriter for &'w mut T {
    type E = T::E;
    fn add(&mut self, name: TriStr<'_>, value: TriStr<'_>) -> Result<(), Self::E> {
        (*self).add(name, value)
    }
}

macro_rules! display_impls {
    ($($ty:ty),*$(,)?) => {$(
        impl WriteUrlValue for $ty {
            fn ser<W: UrlParamWriter>(&self, w: BufferedName<'_, W>) -> Result<(), W::E> {
                w.write(TriStr::Owned(self.to_string()))?;
                Ok(())
            }
        }
    )*};
}

display_impls! {
    u32,
    i32,
}

impl From<&'_ str> for PageRef {
    fn from(s: &'_ str) -> Self {
        Self::Title(s.to_owned())
    }
}

impl From<String> for PageRef {
    fn from(s: String) -> Self {
        Self::Title(s)
    }
}

impl From<Vec<String>> for PageRef {
    fn from(titles: Vec<String>) -> Self {
        Self::Titles(titles)
    }
}

impl From<Vec<&'_ str>> for PageRef {
    fn from(titles: Vec<&'_ str>) -> Self {
        titles.as_slice().into()
    }
}

impl From<&'_ [&'_ str]> for PageRef {
    fn from(titles: &'_ [&'_ str]) -> Self {
        Self::Titles(titles.iter().map(|&t| t.to_owned()).collect())
    }
}

impl<const LEN: usize> From<[&'_ str; LEN]> for PageRef {
    fn from(titles: [&'_ str; LEN]) -> Self {
        titles.as_slice().into()
    }
}

use crate::list::RingList;
use crate::style::{styled, Color};
use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// Values that can be rendered inside the `Display` output of a [`RingList`].
///
/// Text is wrapped in single quotes, everything else is written as is.
/// Implement it with the default method for custom types:
///
/// ```
/// use psycle::{Quoted, RingList};
/// use std::fmt;
///
/// struct Meters(u32);
///
/// impl fmt::Display for Meters {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "{}m", self.0)
///     }
/// }
///
/// impl Quoted for Meters {}
///
/// let list = RingList::from([Meters(3)]);
/// assert!(list.to_string().starts_with("[ 3m"));
/// ```
pub trait Quoted: fmt::Display {
    /// Returns `true` if the value is text and gets quoted.
    fn is_text(&self) -> bool {
        false
    }
}

macro_rules! impl_unquoted {
    ($($ty:ty),* $(,)?) => {
        $(impl Quoted for $ty {})*
    };
}

impl_unquoted!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool
);

macro_rules! impl_text {
    ($($ty:ty),* $(,)?) => {
        $(impl Quoted for $ty {
            fn is_text(&self) -> bool {
                true
            }
        })*
    };
}

impl_text!(str, String, char);

impl<T: Quoted + ?Sized> Quoted for &T {
    fn is_text(&self) -> bool {
        (**self).is_text()
    }
}

impl<T: Quoted + ?Sized> Quoted for Box<T> {
    fn is_text(&self) -> bool {
        (**self).is_text()
    }
}

impl<T: Quoted + ?Sized> Quoted for Rc<T> {
    fn is_text(&self) -> bool {
        (**self).is_text()
    }
}

impl<T: Quoted + ?Sized> Quoted for Arc<T> {
    fn is_text(&self) -> bool {
        (**self).is_text()
    }
}

impl<B> Quoted for Cow<'_, B>
where
    B: Quoted + ToOwned + ?Sized,
    B::Owned: fmt::Display,
{
    fn is_text(&self) -> bool {
        (**self).is_text()
    }
}

/// Renders the ring as `[ v1 > v2 > ... > vN @ ]`.
///
/// Text values are wrapped in single quotes (see [`Quoted`]). The separators
/// are colored through [`styled`](crate::style::styled).
///
/// # Examples
///
/// ```
/// use psycle::style::{styled, Color};
/// use psycle::RingList;
///
/// let list = RingList::from(["a", "b"]);
/// let expected = format!(
///     "[ 'a'{}'b'{} ]",
///     styled(" > ", Color::Blue),
///     styled(" @", Color::Red),
/// );
/// assert_eq!(list.to_string(), expected);
/// ```
impl<T: Quoted> fmt::Display for RingList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[ ")?;
        let last = self.size().saturating_sub(1);
        for (i, value) in self.iter().enumerate() {
            if value.is_text() {
                write!(f, "'{}'", value)?;
            } else {
                write!(f, "{}", value)?;
            }
            if i == last {
                f.write_str(&styled(" @", Color::Red))?;
            } else {
                f.write_str(&styled(" > ", Color::Blue))?;
            }
        }
        f.write_str(" ]")
    }
}

#[cfg(test)]
mod tests {
    use crate::style::{styled, Color};
    use crate::RingList;
    use std::borrow::Cow;
    use std::rc::Rc;
    use std::sync::Arc;

    #[test]
    fn display_numbers() {
        let list = RingList::from([1, 2, 3]);
        let arrow = styled(" > ", Color::Blue);
        let end = styled(" @", Color::Red);
        assert_eq!(list.to_string(), format!("[ 1{arrow}2{arrow}3{end} ]"));
    }

    #[test]
    fn display_quotes_text() {
        let list = RingList::from([String::from("x"), String::from("y")]);
        let arrow = styled(" > ", Color::Blue);
        let end = styled(" @", Color::Red);
        assert_eq!(list.to_string(), format!("[ 'x'{arrow}'y'{end} ]"));

        let single = RingList::from(['z']);
        assert_eq!(single.to_string(), format!("[ 'z'{end} ]"));
    }

    #[test]
    fn display_quotes_text_kinds() {
        let end = styled(" @", Color::Red);
        let expected = format!("[ 'a'{end} ]");
        assert_eq!(RingList::from([Box::<str>::from("a")]).to_string(), expected);
        assert_eq!(RingList::from([Cow::Borrowed("a")]).to_string(), expected);
        assert_eq!(RingList::from([Rc::<str>::from("a")]).to_string(), expected);
        assert_eq!(RingList::from([Arc::new(String::from("a"))]).to_string(), expected);
        assert_eq!(RingList::from([1.5]).to_string(), format!("[ 1.5{end} ]"));
    }

    #[test]
    fn display_borrowed_text() {
        let owned = vec![String::from("p"), String::from("q")];
        let list: RingList<&str> = owned.iter().map(String::as_str).collect();
        let arrow = styled(" > ", Color::Blue);
        let end = styled(" @", Color::Red);
        assert_eq!(list.to_string(), format!("[ 'p'{arrow}'q'{end} ]"));
    }

    #[test]
    fn display_empty() {
        assert_eq!(RingList::<u8>::new().to_string(), "[  ]");
    }
}

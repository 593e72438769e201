#[cfg(test)]
#[ctor::ctor]
fn init_backtrace() {
    color_backtrace::install();
}

pub trait VecMath<T>
where
    T: PartialOrd + Copy,
{
    fn argmax(&self) -> Option<usize>;
}

/// Ties resolve to the lowest index.
impl<T> VecMath<T> for [T]
where
    T: PartialOrd + Copy,
{
    fn argmax(&self) -> Option<usize> {
        let mut max = *self.first()?;
        let mut argmax: usize = 0;

        for (idx, &item) in self.iter().enumerate().skip(1) {
            if item > max {
                max = item;
                argmax = idx;
            }
        }

        Some(argmax)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn test_argmax_prefers_first() {
        let values = vec![3, 7, 1, 7, 1];
        check!(values.argmax() == Some(1));

        let empty: Vec<i64> = vec![];
        check!(empty.argmax() == None);
    }
}

use super::EvalError;

/// Result of any engine step.
pub type Outcome<T> = Result<T, EvalError>;

/// Monadic and applicative combinators over `Result`.
///
/// `map` is the std one. `chain` is bind; `apply` feeds an `Ok` argument to
/// an `Ok` function. Both leave an `Err` untouched, and `apply` reports the
/// function side's error before the argument's.
pub trait OutcomeExt<T, E> {
    fn chain<U, F>(self, f: F) -> Result<U, E>
    where
        F: FnOnce(T) -> Result<U, E>;

    fn apply<A, U>(self, arg: Result<A, E>) -> Result<U, E>
    where
        T: FnOnce(A) -> U;
}

impl<T, E> OutcomeExt<T, E> for Result<T, E> {
    #[inline]
    fn chain<U, F>(self, f: F) -> Result<U, E>
    where
        F: FnOnce(T) -> Result<U, E>,
    {
        self.and_then(f)
    }

    #[inline]
    fn apply<A, U>(self, arg: Result<A, E>) -> Result<U, E>
    where
        T: FnOnce(A) -> U,
    {
        match (self, arg) {
            (Ok(f), Ok(a)) => Ok(f(a)),
            (Err(e), _) => Err(e),
            (Ok(_), Err(e)) => Err(e),
        }
    }
}

/// Combine outcomes left to right with `apply`.
///
/// The accumulator is a partially applied collector, so the first `Err`
/// in iteration order is the one returned.
pub fn sequence<T, E, I>(outcomes: I) -> Result<Vec<T>, E>
where
    I: IntoIterator<Item = Result<T, E>>,
{
    let outcomes = outcomes.into_iter();
    let start: Result<Vec<T>, E> = Ok(Vec::with_capacity(outcomes.size_hint().0));

    outcomes.fold(start, |acc, next| {
        acc.map(|mut done| {
            move |value| {
                done.push(value);
                done
            }
        })
        .apply(next)
    })
}

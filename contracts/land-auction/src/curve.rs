use soroban_sdk::{Env, Vec};

use crate::errors::Error;
use crate::types::{PriceCurve, Segment};

impl PriceCurve {
    /// Build the curve from breakpoints `(times[i], prices[i])`.
    ///
    /// Times are seconds since the auction start and must strictly increase;
    /// prices must never increase. The last time is the auction duration.
    ///
    /// Segment coefficients are truncated, so the evaluated curve is checked
    /// too: a segment may not start above the second before it, and the last
    /// segment may not dip below the end price.
    pub fn build(env: &Env, times: &Vec<u64>, prices: &Vec<i128>) -> Result<PriceCurve, Error> {
        if times.len() != prices.len() || times.len() < 2 {
            return Err(Error::InvalidCurve);
        }

        let mut segments: Vec<Segment> = Vec::new(env);
        let mut prev_time = times.get_unchecked(0);
        let mut prev_price = prices.get_unchecked(0);
        if prev_price < 0 {
            return Err(Error::InvalidCurve);
        }

        for i in 1..times.len() {
            let time = times.get_unchecked(i);
            let price = prices.get_unchecked(i);
            if time <= prev_time || price > prev_price || price < 0 {
                return Err(Error::InvalidCurve);
            }
            let seg = segment(prev_time, prev_price, time, price)?;
            let ceiling = match segments.last() {
                Some(prev) => prev.value_at(prev_time - 1)?,
                None => prev_price,
            };
            if seg.value_at(prev_time)? > ceiling {
                return Err(Error::InvalidCurve);
            }
            segments.push_back(seg);
            prev_time = time;
            prev_price = price;
        }

        if let Some(last) = segments.last() {
            if last.value_at(prev_time - 1)? < prev_price {
                return Err(Error::InvalidCurve);
            }
        }

        Ok(PriceCurve {
            segments,
            start_offset: times.get_unchecked(0),
            duration: prev_time,
            initial_price: prices.get_unchecked(0),
            end_price: prev_price,
        })
    }

    /// Price after `elapsed` seconds of auction.
    pub fn price(&self, elapsed: u64) -> Result<i128, Error> {
        if self.segments.is_empty() {
            return Err(Error::EmptyCurve);
        }
        if elapsed <= self.start_offset {
            return Ok(self.initial_price);
        }

        // Limits increase with the index, so the first segment whose limit
        // exceeds `elapsed` is found by bisection.
        let mut lo = 0;
        let mut hi = self.segments.len();
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.segments.get_unchecked(mid).limit > elapsed {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }
        if lo == self.segments.len() {
            return Ok(self.end_price);
        }

        self.segments.get_unchecked(lo).value_at(elapsed)
    }
}

impl Segment {
    fn value_at(&self, t: u64) -> Result<i128, Error> {
        self.slope
            .checked_mul(i128::from(t))
            .and_then(|drop| self.base.checked_sub(drop))
            .ok_or(Error::ArithmeticOverflow)
    }
}

fn segment(x1: u64, y1: i128, x2: u64, y2: i128) -> Result<Segment, Error> {
    let (x1w, x2w) = (i128::from(x1), i128::from(x2));
    let dx = x2w - x1w;
    let slope = (y1 - y2) / dx;
    let base = x2w
        .checked_mul(y1)
        .zip(x1w.checked_mul(y2))
        .and_then(|(a, b)| a.checked_sub(b))
        .ok_or(Error::ArithmeticOverflow)?
        / dx;
    Ok(Segment {
        slope,
        base,
        limit: x2,
    })
}

use crate::team::Team;
use core::ops::{Index, IndexMut};
use derivative::Derivative;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Derivative, Serialize, Deserialize)]
#[derivative(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamBundle<T> {
    pub a: T,
    pub b: T,
}

impl<T> TeamBundle<T> {
    pub fn new(a: T, b: T) -> Self {
        Self { a, b }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Team, &T)> {
        self.into_iter()
    }

    pub fn map<U, F: FnMut(Team, T) -> U>(self, mut f: F) -> TeamBundle<U> {
        TeamBundle {
            a: f(Team::A, self.a),
            b: f(Team::B, self.b),
        }
    }
}

impl<T: Clone> TeamBundle<T> {
    pub fn splat(value: T) -> Self {
        Self {
            a: value.clone(),
            b: value,
        }
    }
}

impl<T> Index<Team> for TeamBundle<T> {
    type Output = T;

    fn index(&self, team: Team) -> &Self::Output {
        match team {
            Team::A => &self.a,
            Team::B => &self.b,
        }
    }
}

impl<T> IndexMut<Team> for TeamBundle<T> {
    fn index_mut(&mut self, team: Team) -> &mut Self::Output {
        match team {
            Team::A => &mut self.a,
            Team::B => &mut self.b,
        }
    }
}

impl<T: Display> Display for TeamBundle<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "A: {}, B: {}", self.a, self.b)
    }
}

pub struct TeamBundleIterator<'a, T> {
    bundle: &'a TeamBundle<T>,
    index: usize,
}

impl<'a, T> Iterator for TeamBundleIterator<'a, T> {
    type Item = (Team, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let value = match self.index {
            0 => (Team::A, &self.bundle.a),
            1 => (Team::B, &self.bundle.b),
            _ => return None,
        };

        self.index += 1;
        Some(value)
    }
}

impl<'a, T> IntoIterator for &'a TeamBundle<T> {
    type Item = (Team, &'a T);
    type IntoIter = TeamBundleIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        TeamBundleIterator {
            bundle: self,
            index: 0,
        }
    }
}

impl<T> IntoIterator for TeamBundle<T> {
    type Item = (Team, T);
    type IntoIter = std::array::IntoIter<Self::Item, 2>;

    fn into_iter(self) -> Self::IntoIter {
        [(Team::A, self.a), (Team::B, self.b)].into_iter()
    }
}

impl<T: Default> FromIterator<(Team, T)> for TeamBundle<T> {
    fn from_iter<I: IntoIterator<Item = (Team, T)>>(iter: I) -> Self {
        let mut bundle = TeamBundle::default();
        for (team, value) in iter {
            bundle[team] = value;
        }
        bundle
    }
}

impl<T, E> TeamBundle<Result<T, E>> {
    pub fn complete(self) -> Result<TeamBundle<T>, E> {
        Ok(TeamBundle {
            a: self.a?,
            b: self.b?,
        })
    }
}

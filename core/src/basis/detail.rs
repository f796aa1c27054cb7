use std::fmt::{self, Write};

use super::set::BasisSet;

impl BasisSet {
    /// Writes the summary followed by every shell, grouped by center.
    pub fn print_detail(&self, out: &mut impl Write) -> fmt::Result {
        write!(out, "{self}")?;
        writeln!(out)?;
        writeln!(out, "  Shell detail:")?;

        for center in 0..self.ncenter() {
            let label = self.center_label(center);
            let position = self.center_position(center);
            writeln!(
                out,
                "   Atom {:>3} {:<6} {:>14.8} {:>14.8} {:>14.8}",
                center + 1,
                label,
                position.x,
                position.y,
                position.z
            )?;

            for shell in (0..self.nshell_on_center(center))
                .filter_map(|index| self.shell_on_center(center, index))
            {
                writeln!(out, "    {} {:>3} 1.00", shell.am_letter(), shell.nprimitive())?;
                let primitives = shell.exponents.iter().zip(shell.original_coefficients);
                for (exponent, coefficient) in primitives {
                    writeln!(out, "      {exponent:>20.8} {coefficient:>20.8}")?;
                }
            }
        }

        Ok(())
    }

    /// [`BasisSet::print_detail`] into a string.
    pub fn detail(&self) -> String {
        let mut detail = String::new();
        // writing into a String cannot fail
        let _ = self.print_detail(&mut detail);
        detail
    }
}

impl fmt::Display for BasisSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Basis Set: {}", self.name())?;
        writeln!(f, "    Number of shells: {}", self.nshell())?;
        writeln!(f, "    Number of basis functions: {}", self.nbf())?;
        writeln!(f, "    Number of Cartesian functions: {}", self.nao())?;
        writeln!(f, "    Number of primitives: {}", self.nprimitive())?;
        writeln!(f, "    Spherical Harmonics?: {}", self.has_puream())?;
        writeln!(f, "    Max angular momentum: {}", self.max_am())
    }
}

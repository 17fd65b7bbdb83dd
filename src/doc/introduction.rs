/*!
# Introductory Tutorial for Forter

Forter looks like an 8-bit BASIC with most of it taken away. There are no
variable names. There are only numbers, and every number is also the name
of a cell that can hold something else.

Save a program to a file and run it. Stop a running program with CTRL-C.
```text
$ cat hello.fo
10 PRINT "Hello World"
20 END
$ forter hello.fo
Hello World
```

Lines run in order of their numbers. A line may hold several commands
separated by a colon. A colon at the end of a source line continues the
same Forter line on the next source line. Spaces are ignored everywhere
except inside quotes, so `P R I N T` is the same as `PRINT`.

## Numbers are cells

Writing the number `1` in an expression does not mean one. It means the
contents of cell 1. Nothing has been stored in cell 1 yet, and an empty
cell reads as its own number, so it looks like one.

```text
10 LET 1=5
20 PRINT 1+1
30 END
```
```text
10
```

Arithmetic results are plain values. Only a bare number names a cell.
Parentheses around a number do nothing; `(1)` is still cell 1.

## Line numbers are cells too

A line number is an expression, evaluated again before every line is
chosen. Storing into the cell a line number reads moves the line.

```text
10 LET 30=15
20 PRINT "second":END
30 PRINT "first"
```
```text
first
second
```

After line 10 runs, line 30 evaluates to 15, which now comes before 20.
The next line is always the one with the smallest number greater than the
number of the line that just ran. When there is none, the program stops
with `UNDEFINED LINE`. Use `END` to stop cleanly.

## Values are copied

`LET` always evaluates its right side first and stores the result. The
left cell gets a copy, so changing it later leaves every other cell alone.

```text
10 LET 1=5
20 LET 1=1+1
30 PRINT 5:PRINT 1
40 END
```
```text
5
10
```

## Operators

`+ - * /` on integers, and `+` to join two strings. There is no
precedence: operators chain to the right, so `1+2*3` is `1+(2*3)` and
`8-2-1` is `8-(2-1)`. Use parentheses to group otherwise.

*/
